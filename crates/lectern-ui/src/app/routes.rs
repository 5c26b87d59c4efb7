//! Routing definitions for the Lectern UI.
use crate::core::guard::ViewKind;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/courses")]
    Courses,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Guarded page behind this route; `None` for routes that only redirect.
    pub(crate) const fn view(&self) -> Option<ViewKind> {
        match self {
            Self::Login => Some(ViewKind::Login),
            Self::Courses => Some(ViewKind::Courses),
            Self::Admin => Some(ViewKind::Admin),
            Self::Home | Self::NotFound => None,
        }
    }
}

impl From<ViewKind> for Route {
    fn from(view: ViewKind) -> Self {
        match view {
            ViewKind::Login => Self::Login,
            ViewKind::Courses => Self::Courses,
            ViewKind::Admin => Self::Admin,
        }
    }
}
