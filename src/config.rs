//! Configuration management for the backup uploader
//!
//! Every option comes from the command line, falling back to an environment
//! variable (a `.env` file is loaded first) and then to a fixed default.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Upload one directory of backups to AWS Glacier or S3.
#[derive(Debug, Clone, Parser)]
#[command(name = "backup-uploader", version, about)]
pub struct Config {
    /// AWS account access key ID
    #[arg(
        short = 'a',
        long = "access-key",
        alias = "access_key",
        env = "AWS_ACCESS_KEY_ID",
        default_value = "Z123456",
        hide_env_values = true
    )]
    pub access_key: String,

    /// AWS account secret key
    #[arg(
        short = 's',
        long = "secret-key",
        alias = "secret_key",
        env = "AWS_SECRET_ACCESS_KEY",
        default_value = "A123456",
        hide_env_values = true
    )]
    pub secret_key: String,

    /// AWS account vault name (Glacier)
    #[arg(
        short = 'v',
        long = "vault-name",
        alias = "vault_name",
        env = "BACKUP_UPLOADER_VAULT",
        default_value = "some Glacier vault"
    )]
    pub vault_name: String,

    /// AWS account bucket name (S3)
    #[arg(
        short = 'b',
        long = "bucket-name",
        alias = "bucket_name",
        env = "BACKUP_UPLOADER_BUCKET",
        default_value = "some S3 bucket"
    )]
    pub bucket_name: String,

    /// Directory where backups are
    #[arg(
        short = 'd',
        long = "backup-dir",
        alias = "backup_dir",
        env = "BACKUP_UPLOADER_DIR",
        default_value = "/data/backup"
    )]
    pub backup_dir: PathBuf,

    /// Uploaded files history (Glacier)
    #[arg(
        short = 'l',
        long = "history-file",
        alias = "history_file",
        env = "BACKUP_UPLOADER_HISTORY",
        default_value = "history.json"
    )]
    pub history_file: PathBuf,

    /// Backups extension; an empty value selects every entry
    #[arg(
        short = 'e',
        long = "backup-ext",
        alias = "backup_ext",
        env = "BACKUP_UPLOADER_EXT",
        default_value = ".back.7z"
    )]
    pub backup_ext: String,

    /// Uploader mode
    #[arg(
        short = 'm',
        long = "mode",
        env = "BACKUP_UPLOADER_MODE",
        value_enum,
        default_value_t = UploadMode::S3
    )]
    pub mode: UploadMode,

    /// AWS region
    #[arg(long = "region", env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Custom endpoint for S3-compatible services (MinIO, R2, ...)
    #[arg(long = "endpoint", env = "BACKUP_UPLOADER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Keep local files whose S3 upload failed instead of deleting them
    #[arg(long = "strict-bucket-cleanup", env = "BACKUP_UPLOADER_STRICT_BUCKET_CLEANUP")]
    pub strict_bucket_cleanup: bool,
}

/// Which backend receives the backups
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UploadMode {
    Glacier,
    S3,
}

/// Connection settings shared by both storage clients
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub endpoint: Option<String>,
}

impl Config {
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
        }
    }

    /// Name of the remote target the selected mode uploads to
    pub fn target_name(&self) -> &str {
        match self.mode {
            UploadMode::Glacier => &self.vault_name,
            UploadMode::S3 => &self.bucket_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_tool() {
        let config = Config::try_parse_from(["backup-uploader"]).unwrap();

        assert_eq!(config.mode, UploadMode::S3);
        assert_eq!(config.backup_dir, PathBuf::from("/data/backup"));
        assert_eq!(config.backup_ext, ".back.7z");
        assert_eq!(config.history_file, PathBuf::from("history.json"));
        assert_eq!(config.target_name(), config.bucket_name);
        assert!(!config.strict_bucket_cleanup);
    }

    #[test]
    fn test_short_flags_and_snake_case_aliases() {
        let config = Config::try_parse_from([
            "backup-uploader",
            "-m",
            "glacier",
            "-v",
            "nightly",
            "--backup_dir",
            "/tmp/backups",
            "-e",
            "",
        ])
        .unwrap();

        assert_eq!(config.mode, UploadMode::Glacier);
        assert_eq!(config.target_name(), "nightly");
        assert_eq!(config.backup_dir, PathBuf::from("/tmp/backups"));
        assert!(config.backup_ext.is_empty());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = Config::try_parse_from(["backup-uploader", "--mode", "tape"]);

        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_storage_config_carries_endpoint() {
        let config = Config::try_parse_from([
            "backup-uploader",
            "--endpoint",
            "http://localhost:9000",
            "--region",
            "eu-west-1",
        ])
        .unwrap();

        let storage = config.storage();
        assert_eq!(storage.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(storage.region, "eu-west-1");
    }
}
