use std::fmt;

/// Client-side screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Update(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Create => "/create".to_string(),
            Route::Update(id) => format!("/update/{}", id),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::List),
            "/create" => Some(Route::Create),
            _ => path
                .strip_prefix("/update/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::Update(id.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
