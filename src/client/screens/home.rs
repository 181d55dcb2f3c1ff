/// Landing screen; static content only.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeScreen;

pub const FEATURES: [(&str, &str); 3] = [
    ("Buy Tickets Easily", "Browse popular events and save the ones you want to attend."),
    ("Friends & Social", "See what your friends are going to and plan together."),
    ("Groups & Plans", "Create groups and collect events for your next outing."),
];

impl HomeScreen {
    pub fn title(&self) -> &'static str {
        "Welcome to EventLink"
    }

    pub fn render(&self) -> Vec<String> {
        let mut out = vec![self.title().to_string()];
        for (heading, body) in FEATURES {
            out.push(heading.to_string());
            out.push(body.to_string());
        }
        out
    }
}
