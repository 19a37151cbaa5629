#![deny(missing_docs)]

//! # Source Options
//!
//! Discovery options shared by every command, and the pipeline that turns
//! them into an assembled collection.

use std::path::PathBuf;

use clap::ArgGroup;
use wpc_core::wp::SiteInfo;
use wpc_core::{
    assemble, collect_requests, organize, AppError, AppResult, BrunoNormalizer, CollectionDocument,
    FileSource,
};

/// Collection name used when neither `--name` nor the site title is known.
pub const DEFAULT_COLLECTION_NAME: &str = "WordPress API";

/// Base URL used when the index does not advertise the site URL.
pub const FALLBACK_BASE_URL: &str = "http://localhost/wp-json";

/// Where the API index comes from, and how to present it.
#[derive(clap::Args, Debug, Clone)]
#[clap(group(ArgGroup::new("source").required(true).args(["url", "index_file"])))]
pub struct SourceArgs {
    /// Site URL to discover, e.g. `https://example.com`.
    #[clap(long)]
    pub url: Option<String>,

    /// Saved `wp-json` index document.
    #[clap(long)]
    pub index_file: Option<PathBuf>,

    /// Collection name. Defaults to the site title.
    #[clap(long)]
    pub name: Option<String>,

    /// Username for basic (application password) authentication.
    #[clap(short, long, env = "WP_USERNAME")]
    pub username: Option<String>,

    /// Password for basic (application password) authentication.
    #[clap(long, env = "WP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Discovers, transforms, organizes and assembles the collection.
pub fn build_collection(args: &SourceArgs) -> AppResult<CollectionDocument> {
    // 1. Discover
    let discovery = match (&args.url, &args.index_file) {
        (Some(url), _) => discover_site(url, args)?,
        (None, Some(path)) => {
            if !path.exists() {
                return Err(AppError::General(format!("Index file not found: {:?}", path)));
            }
            tracing::info!(path = ?path, "reading saved index");
            collect_requests(&FileSource::new(path))?
        }
        (None, None) => {
            return Err(AppError::General(
                "Either --url or --index-file is required".into(),
            ))
        }
    };

    // 2. Resolve presentation
    let name = collection_name(args, &discovery.site);
    let base_url = base_url(args, &discovery.site);
    tracing::info!(
        collection = %name,
        base_url = %base_url,
        requests = discovery.requests.len(),
        "compiling collection"
    );

    // 3. Organize and assemble
    let items = organize(discovery.requests);
    assemble(&name, items, &base_url, &BrunoNormalizer)
}

fn collection_name(args: &SourceArgs, site: &SiteInfo) -> String {
    args.name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| site.name.clone())
        .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string())
}

fn base_url(args: &SourceArgs, site: &SiteInfo) -> String {
    if let Some(url) = &args.url {
        return format!("{}/wp-json", site_root(url));
    }
    site.api_root().unwrap_or_else(|| {
        tracing::warn!(fallback = FALLBACK_BASE_URL, "index does not advertise a site URL");
        FALLBACK_BASE_URL.to_string()
    })
}

/// Strips trailing slashes and a trailing `/wp-json` from a user supplied URL.
pub fn site_root(url: &str) -> &str {
    let url = url.trim().trim_end_matches('/');
    url.strip_suffix("/wp-json")
        .unwrap_or(url)
        .trim_end_matches('/')
}

#[cfg(feature = "client")]
fn discover_site(url: &str, args: &SourceArgs) -> AppResult<wpc_core::Discovery> {
    let source = http::HttpSource::new(url, args.username.as_deref(), args.password.as_deref())?;
    collect_requests(&source)
}

#[cfg(not(feature = "client"))]
fn discover_site(_url: &str, _args: &SourceArgs) -> AppResult<wpc_core::Discovery> {
    Err(AppError::General(
        "--url requires the `client` feature; use --index-file".into(),
    ))
}

#[cfg(feature = "client")]
pub mod http {
    //! Live discovery over HTTP.

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde_json::Value;
    use ureq::typestate::WithoutBody;
    use url::Url;
    use wpc_core::wp::discovery::parse_schema;
    use wpc_core::wp::routes::pattern::has_capture_group;
    use wpc_core::wp::{ResourceSchema, RouteEntry};
    use wpc_core::{AppError, AppResult, RouteSource};

    use super::site_root;

    /// A [`RouteSource`] that queries a live site.
    ///
    /// The index comes from `GET {site}/wp-json/`. Routes without capture
    /// groups are introspected with `OPTIONS` for their full schema.
    pub struct HttpSource {
        agent: ureq::Agent,
        api_root: Url,
        authorization: Option<String>,
    }

    impl HttpSource {
        /// Creates a source for `site`, authenticating when both credentials are given.
        pub fn new(site: &str, username: Option<&str>, password: Option<&str>) -> AppResult<Self> {
            let api_root = Url::parse(&format!("{}/wp-json/", site_root(site)))
                .map_err(|e| AppError::Http(format!("Invalid site URL '{}': {}", site, e)))?;

            let authorization = match (username, password) {
                (Some(user), Some(pass)) if !user.is_empty() => Some(basic_auth(user, pass)),
                (Some(_), None) | (None, Some(_)) => {
                    tracing::warn!("ignoring partial credentials, both username and password are needed");
                    None
                }
                _ => None,
            };

            Ok(Self {
                agent: ureq::Agent::new_with_defaults(),
                api_root,
                authorization,
            })
        }

        /// The `wp-json/` root every route is resolved against.
        pub fn api_root(&self) -> &Url {
            &self.api_root
        }

        /// Absolute URL of a route.
        pub fn route_url(&self, route: &str) -> AppResult<Url> {
            self.api_root
                .join(route.trim_start_matches('/'))
                .map_err(|e| AppError::Http(format!("Invalid route '{}': {}", route, e)))
        }

        fn get_json(&self, url: &Url) -> AppResult<Value> {
            self.call_json("GET", self.agent.get(url.as_str()), url)
        }

        fn options_json(&self, url: &Url) -> AppResult<Value> {
            self.call_json("OPTIONS", self.agent.options(url.as_str()), url)
        }

        fn call_json(
            &self,
            method: &str,
            mut request: ureq::RequestBuilder<WithoutBody>,
            url: &Url,
        ) -> AppResult<Value> {
            tracing::debug!(%url, method, "request");
            if let Some(auth) = &self.authorization {
                request = request.header("Authorization", auth);
            }
            let mut response = request
                .call()
                .map_err(|e| AppError::Http(format!("{} {} failed: {}", method, url, e)))?;
            response.body_mut().read_json::<Value>().map_err(|e| {
                AppError::Http(format!("{} {} returned invalid JSON: {}", method, url, e))
            })
        }
    }

    impl RouteSource for HttpSource {
        fn index(&self) -> AppResult<Value> {
            let root = self.api_root();
            tracing::info!(url = %root, "fetching API index");
            self.get_json(root)
        }

        fn route_schema(&self, route: &str, entry: &RouteEntry) -> AppResult<Option<ResourceSchema>> {
            let inline = || entry.schema.as_ref().and_then(parse_schema);
            if has_capture_group(route) {
                return Ok(inline());
            }

            let detail = self.options_json(&self.route_url(route)?)?;
            match detail.get("schema").and_then(parse_schema) {
                Some(schema) => Ok(Some(schema)),
                None => Ok(inline()),
            }
        }
    }

    /// `Authorization` header value for HTTP basic authentication.
    pub fn basic_auth(username: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
    }

}
