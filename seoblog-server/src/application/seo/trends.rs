use rand::seq::SliceRandom;

pub(crate) const TRENDS_PER_REFRESH: usize = 3;

pub(crate) trait TrendSource: Send + Sync {
    fn current_trends(&self, topic: &str, year: i32) -> Vec<String>;
}

/// Stand-in for a live trend feed: templated sentences in random order.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct MockTrendSource;

impl TrendSource for MockTrendSource {
    fn current_trends(&self, topic: &str, year: i32) -> Vec<String> {
        let mut trends = trend_templates(topic, year);
        trends.shuffle(&mut rand::rng());
        trends.truncate(TRENDS_PER_REFRESH);
        trends
    }
}

fn trend_templates(topic: &str, year: i32) -> Vec<String> {
    vec![
        format!("AI-powered {topic} tools are revolutionizing the industry in {year}."),
        format!("Top {topic} strategies to boost your business in {year}."),
        format!("Emerging trends in {topic} for {year} include automation and personalization."),
        format!("How {topic} is evolving with new technologies in {year}."),
        format!("Best practices for {topic} in {year} to stay ahead of competition."),
    ]
}
