use seed::Url;

/// Top-level paths served by other parts of the site. Links to them must
/// leave this app with a full page load.
pub const SERVED_ELSEWHERE: &[&str] = &["add-song", "player"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Page {
    Home,
    NotFound,
}

impl Page {
    pub fn href(&self) -> &'static str {
        match self {
            Page::Home => "#/",
            Page::NotFound => "#/not-found",
        }
    }

    pub fn from_url(url: Url) -> Page {
        Page::from_path(
            url.hash()
                .unwrap_or(&String::default())
                .split('/')
                .collect::<Vec<&str>>(),
        )
    }

    pub fn is_served_elsewhere(url: &Url) -> bool {
        match url.path() {
            [first, ..] => SERVED_ELSEWHERE.contains(&first.as_str()),
            [] => false,
        }
    }

    pub fn from_path(path: Vec<&str>) -> Page {
        match path[..] {
            [""] | ["", ""] => Page::Home,
            _ => Page::NotFound,
        }
    }
}
