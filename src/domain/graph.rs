use url::{Url, form_urlencoded};

use crate::domain::entities::{BrowserOutcome, HttpRequest};

pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_DIALOG_URL: &str = "https://www.facebook.com";
pub const DEFAULT_GRAPH_VERSION: &str = "v2.5";
pub const DEFAULT_REDIRECT_URI: &str = "https://www.facebook.com/connect/login_success.html";

// Fields requested from the profile endpoint while validating a token.
const VALIDATION_FIELDS: &str = "id,name";

// Endpoint layout of the social provider's Graph API and login dialog.
#[derive(Clone, Debug)]
pub struct GraphApi {
    app_id: String,
    version: String,
    graph_base: Url,
    dialog_base: Url,
    redirect_uri: Url,
    scopes: Vec<String>,
}

impl GraphApi {
    pub fn new(app_id: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            app_id: app_id.into(),
            version: DEFAULT_GRAPH_VERSION.to_string(),
            graph_base: Url::parse(DEFAULT_GRAPH_URL)?,
            dialog_base: Url::parse(DEFAULT_DIALOG_URL)?,
            redirect_uri: Url::parse(DEFAULT_REDIRECT_URI)?,
            scopes: vec!["public_profile".to_string()],
        })
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_graph_base(mut self, graph_base: &str) -> Result<Self, url::ParseError> {
        self.graph_base = Url::parse(graph_base)?;
        Ok(self)
    }

    pub fn with_dialog_base(mut self, dialog_base: &str) -> Result<Self, url::ParseError> {
        self.dialog_base = Url::parse(dialog_base)?;
        Ok(self)
    }

    pub fn with_redirect_uri(mut self, redirect_uri: &str) -> Result<Self, url::ParseError> {
        self.redirect_uri = Url::parse(redirect_uri)?;
        Ok(self)
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    // GET {graph}/{version}/me?access_token=..&fields=id,name
    pub fn validation_request(&self, access_token: &str) -> HttpRequest {
        let mut url = self.graph_base.clone();
        url.set_path(&format!("{}/me", self.version));
        url.query_pairs_mut()
            .clear()
            .append_pair("access_token", access_token)
            .append_pair("fields", VALIDATION_FIELDS);
        HttpRequest::get(url)
    }

    // Implicit-grant dialog: the token comes back in the redirect fragment.
    pub fn login_dialog_url(&self) -> Url {
        let mut url = self.dialog_base.clone();
        url.set_path(&format!("{}/dialog/oauth", self.version));
        {
            let mut query = url.query_pairs_mut();
            query
                .clear()
                .append_pair("client_id", &self.app_id)
                .append_pair("redirect_uri", self.redirect_uri.as_str())
                .append_pair("response_type", "token");
            if !self.scopes.is_empty() {
                query.append_pair("scope", &self.scopes.join(","));
            }
        }
        url
    }
}

// Interprets the URL the login dialog redirected to.
pub fn parse_login_redirect(redirect: &str) -> BrowserOutcome {
    let redirect = redirect.trim();
    if redirect.is_empty() {
        return BrowserOutcome::Cancelled;
    }

    let url = match Url::parse(redirect) {
        Ok(url) => url,
        Err(err) => return BrowserOutcome::Failed(format!("invalid redirect url: {err}")),
    };

    // Implicit grant puts the result in the fragment; errors arrive in the query.
    let mut pairs: Vec<(String, String)> = url
        .fragment()
        .map(|fragment| {
            form_urlencoded::parse(fragment.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();
    pairs.extend(url.query_pairs().into_owned());

    let lookup = |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };

    if let Some(token) = lookup("access_token") {
        return BrowserOutcome::Token(token.to_string());
    }

    match (lookup("error"), lookup("error_reason")) {
        (Some("access_denied"), _) | (_, Some("user_denied")) => BrowserOutcome::Cancelled,
        (Some(error), _) => {
            let description = lookup("error_description").unwrap_or(error);
            BrowserOutcome::Failed(description.to_string())
        }
        (None, _) => BrowserOutcome::Failed("redirect carried no access token".to_string()),
    }
}
