//! Navigation model
//!
//! Three pages, one active at a time. The state travels in the query
//! string (`/?page=predict`), so every request starts from `PageState`
//! and applies the selected `NavItem`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    #[serde(rename = "predict")]
    PredictionForm,
    Emergency,
}

impl Page {
    /// Navigation bar order
    pub const ALL: [Page; 3] = [Page::Home, Page::PredictionForm, Page::Emergency];

    pub fn slug(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::PredictionForm => "predict",
            Page::Emergency => "emergency",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::PredictionForm => "🐾 Disease Checker",
            Page::Emergency => "🚨 Emergency",
        }
    }

    pub fn href(&self) -> String {
        format!("/?page={}", self.slug())
    }
}

/// A navigation bar entry the user can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavItem {
    Home,
    Predict,
    Emergency,
}

impl NavItem {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "home" => Some(NavItem::Home),
            "predict" => Some(NavItem::Predict),
            "emergency" => Some(NavItem::Emergency),
            _ => None,
        }
    }

    pub fn target(&self) -> Page {
        match self {
            NavItem::Home => Page::Home,
            NavItem::Predict => Page::PredictionForm,
            NavItem::Emergency => Page::Emergency,
        }
    }
}

/// Page-selection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageState {
    pub page: Page,
}

impl PageState {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Transition on a navigation pick
    pub fn select(self, item: NavItem) -> Self {
        Self { page: item.target() }
    }

    /// State for a `?page=` value; unknown or missing values stay on Home
    pub fn from_query(page: Option<&str>) -> Self {
        match page.and_then(NavItem::from_slug) {
            Some(item) => Self::default().select(item),
            None => Self::default(),
        }
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.page == page
    }
}

/// `GET /` query string
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_home() {
        assert_eq!(PageState::default().page, Page::Home);
    }

    #[test]
    fn test_select_transitions() {
        let state = PageState::default();
        for page in Page::ALL {
            assert_eq!(PageState::new(page).select(NavItem::Home).page, Page::Home);
            assert_eq!(PageState::new(page).select(NavItem::Predict).page, Page::PredictionForm);
            assert_eq!(PageState::new(page).select(NavItem::Emergency).page, Page::Emergency);
        }
        assert!(state.select(NavItem::Emergency).is_active(Page::Emergency));
    }

    #[test]
    fn test_from_query() {
        assert_eq!(PageState::from_query(Some("predict")).page, Page::PredictionForm);
        assert_eq!(PageState::from_query(Some("EMERGENCY")).page, Page::Emergency);
        assert_eq!(PageState::from_query(Some("admin")).page, Page::Home);
        assert_eq!(PageState::from_query(None).page, Page::Home);
    }

    #[test]
    fn test_slugs_round_trip() {
        for page in Page::ALL {
            let item = NavItem::from_slug(page.slug()).unwrap();
            assert_eq!(item.target(), page);
        }
        assert_eq!(Page::Emergency.href(), "/?page=emergency");
    }

    #[test]
    fn test_state_serializes_slug() {
        let json = serde_json::to_string(&PageState::new(Page::PredictionForm)).unwrap();
        assert_eq!(json, r#"{"page":"predict"}"#);
    }
}
