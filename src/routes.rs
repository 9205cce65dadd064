use std::fmt;

/// Navigation targets of the intake frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Input,
    Processing,
    Results,
    Contact,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Input => "/input",
            Route::Processing => "/processing",
            Route::Results => "/results",
            Route::Contact => "/contact",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
