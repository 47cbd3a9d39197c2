use serde::Deserialize;

/// Form body of POST /login and POST /signup
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
