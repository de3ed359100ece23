use std::path::PathBuf;

/// Default local storage root, relative to the working directory.
const DEFAULT_LOCAL_DIR: &str = "storage/media";

/// Default URL prefix for the local backend (served by the API at `/media`).
const DEFAULT_LOCAL_PUBLIC_URL: &str = "http://localhost:3000/media";

/// Which image backend to use and how to reach it.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    S3 {
        bucket: String,
        region: String,
        /// Custom endpoint for S3-compatible stores (MinIO, R2, ...).
        endpoint: Option<String>,
        public_base_url: String,
    },
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                   | Default                                  |
    /// |---------------------------|------------------------------------------|
    /// | `STORAGE_BACKEND`         | `local` (`local` or `s3`)                |
    /// | `STORAGE_LOCAL_DIR`       | `storage/media`                          |
    /// | `STORAGE_PUBLIC_BASE_URL` | see [`default_s3_public_url`] for `s3`   |
    /// | `S3_BUCKET`               | required for `s3`                        |
    /// | `S3_REGION`               | required for `s3`                        |
    /// | `S3_ENDPOINT`             | unset                                    |
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend or when an `s3` setting is missing.
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        match backend.as_str() {
            "local" => Self::Local {
                root: std::env::var("STORAGE_LOCAL_DIR")
                    .unwrap_or_else(|_| DEFAULT_LOCAL_DIR.into())
                    .into(),
                public_base_url: public_base_url
                    .unwrap_or_else(|| DEFAULT_LOCAL_PUBLIC_URL.into()),
            },
            "s3" => {
                let bucket = std::env::var("S3_BUCKET").expect("S3_BUCKET must be set for s3");
                let region = std::env::var("S3_REGION").expect("S3_REGION must be set for s3");
                let endpoint = std::env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty());
                let public_base_url = public_base_url.unwrap_or_else(|| {
                    default_s3_public_url(&bucket, &region, endpoint.as_deref())
                });
                Self::S3 {
                    bucket,
                    region,
                    endpoint,
                    public_base_url,
                }
            }
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be one of: local, s3"),
        }
    }

    /// Local root directory when the local backend is configured.
    pub fn local_root(&self) -> Option<&PathBuf> {
        match self {
            Self::Local { root, .. } => Some(root),
            Self::S3 { .. } => None,
        }
    }
}

/// Public URL prefix for objects when `STORAGE_PUBLIC_BASE_URL` is unset.
///
/// Path-style under a custom endpoint, the AWS virtual-hosted URL otherwise.
pub fn default_s3_public_url(bucket: &str, region: &str, endpoint: Option<&str>) -> String {
    match endpoint {
        Some(endpoint) => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aws_default_is_virtual_hosted() {
        assert_eq!(
            default_s3_public_url("plants", "eu-west-1", None),
            "https://plants.s3.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn custom_endpoint_is_path_style() {
        assert_eq!(
            default_s3_public_url("plants", "us-east-1", Some("http://minio.local:9000")),
            "http://minio.local:9000/plants"
        );
        assert_eq!(
            default_s3_public_url("plants", "auto", Some("https://r2.example.com/")),
            "https://r2.example.com/plants"
        );
    }
}
