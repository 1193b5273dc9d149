//! Xtream Codes credentials and URL construction

use tracing::debug;
use url::Url;

/// Credentials for one Xtream provider account
#[derive(Debug, Clone)]
pub struct XtreamCredentials {
    /// Server base URL without trailing slash (e.g., "http://example.com:8080")
    pub server: String,
    pub username: String,
    pub password: String,
}

/// Kind of stream a playback URL is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Live,
    Movie,
    Series,
}

impl StreamKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "live" => Some(Self::Live),
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Live => "live",
            StreamKind::Movie => "movie",
            StreamKind::Series => "series",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            StreamKind::Live => "m3u8",
            StreamKind::Movie | StreamKind::Series => "mp4",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl XtreamCredentials {
    /// Build credentials, stripping trailing slashes from the server URL
    pub fn new(server: &str, username: &str, password: &str) -> Self {
        Self {
            server: server.trim().trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Check that the server is an absolute http(s) URL with a host.
    ///
    /// No request is made to the provider.
    pub fn has_valid_server(&self) -> bool {
        let parsed = match Url::parse(&self.server) {
            Ok(url) => url,
            Err(e) => {
                debug!("Failed to parse server URL: {}", e);
                return false;
            }
        };

        matches!(parsed.scheme(), "http" | "https")
            && parsed.host_str().map_or(false, |h| !h.is_empty())
    }

    /// Build the player_api.php base URL
    pub fn api_url(&self) -> String {
        format!(
            "{}/player_api.php?username={}&password={}",
            self.server,
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password)
        )
    }

    /// Build the playback URL for a stream
    pub fn stream_url(&self, kind: StreamKind, stream_id: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}.{}",
            self.server,
            kind.as_str(),
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
            urlencoding::encode(stream_id),
            kind.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_removed() {
        let creds = XtreamCredentials::new("http://example.com:8080/", "user", "pass");
        assert_eq!(creds.server, "http://example.com:8080");
        assert!(!creds.api_url().contains("//player_api"));
    }

    #[test]
    fn test_api_url_encodes_credentials() {
        let creds = XtreamCredentials::new("http://example.com", "user name", "p&ss");
        assert_eq!(
            creds.api_url(),
            "http://example.com/player_api.php?username=user%20name&password=p%26ss"
        );
    }

    #[test]
    fn test_server_validation() {
        assert!(XtreamCredentials::new("http://example.com:8080", "u", "p").has_valid_server());
        assert!(XtreamCredentials::new("https://iptv.example", "u", "p").has_valid_server());
        assert!(!XtreamCredentials::new("example.com", "u", "p").has_valid_server());
        assert!(!XtreamCredentials::new("ftp://example.com", "u", "p").has_valid_server());
        assert!(!XtreamCredentials::new("not a url", "u", "p").has_valid_server());
    }

    #[test]
    fn test_stream_urls() {
        let creds = XtreamCredentials::new("http://example.com", "user", "pass");
        assert_eq!(
            creds.stream_url(StreamKind::Live, "1001"),
            "http://example.com/live/user/pass/1001.m3u8"
        );
        assert_eq!(
            creds.stream_url(StreamKind::Movie, "5001"),
            "http://example.com/movie/user/pass/5001.mp4"
        );
        assert_eq!(
            creds.stream_url(StreamKind::Series, "7"),
            "http://example.com/series/user/pass/7.mp4"
        );
        assert_eq!(StreamKind::parse("radio"), None);
    }

    #[test]
    fn test_stream_id_cannot_add_path_segments() {
        let creds = XtreamCredentials::new("http://example.com", "user", "pass");
        assert_eq!(
            creds.stream_url(StreamKind::Live, "a/../b"),
            "http://example.com/live/user/pass/a%2F..%2Fb.m3u8"
        );
    }
}
