use farmgraph::Advisor;

#[derive(Clone)]
pub struct AppState {
    pub advisor: Advisor,
}

impl AppState {
    pub fn new(advisor: Advisor) -> Self {
        Self { advisor }
    }
}
