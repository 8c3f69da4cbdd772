//! Navigation and view switching utilities.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Agents,
    Builder,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Agents => "Agents",
            View::Builder => "Builder",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::Dashboard, View::Agents, View::Builder]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }

    /// Whether the view lists agents fetched from the API.
    pub fn needs_agents(&self) -> bool {
        matches!(self, View::Dashboard | View::Agents)
    }
}
