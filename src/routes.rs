use std::fmt;

/// Who may open a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Jobs,
    Login,
    Register,
    Profile,
    Cms,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Jobs => "/#jobs",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Profile => "/profile",
            Self::Cms => "/cms",
        }
    }

    pub fn requirement(&self) -> Requirement {
        match self {
            Self::Home | Self::Jobs | Self::Login | Self::Register => Requirement::Public,
            Self::Profile => Requirement::Authenticated,
            Self::Cms => Requirement::Admin,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
