use std::path::PathBuf;

use clap::Parser;

/// Backend base URL used when neither the flag nor the environment names one.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "wardrobe-chat")]
#[command(version = "0.1.0")]
#[command(about = "Interactive terminal chat for the Wardrobe Stylist backend")]
pub struct Args {
    /// Base URL of the stylist backend (falls back to $STYLIST_SERVER)
    #[arg(long)]
    pub server: Option<String>,

    /// Image files to upload before the chat starts
    #[arg(long, value_name = "FILE")]
    pub upload: Vec<PathBuf>,

    /// Trigger wardrobe processing on startup
    #[arg(long)]
    pub process: bool,

    /// Directory where /save stores recommended images
    #[arg(long, default_value = "recommendations")]
    pub save_dir: PathBuf,
}

/// Pick the backend base URL: explicit flag, then the STYLIST_SERVER
/// environment variable, then the default.
pub fn resolve_server(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("STYLIST_SERVER").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_server_flag_wins() {
        assert_eq!(
            resolve_server(Some("http://10.0.0.5:9000".to_string())),
            "http://10.0.0.5:9000"
        );
    }

    #[test]
    fn test_resolve_server_default_without_flag_or_env() {
        std::env::remove_var("STYLIST_SERVER");
        assert_eq!(resolve_server(None), DEFAULT_SERVER);
    }

    #[test]
    fn test_args_parse_minimal() {
        let args = Args::parse_from(["wardrobe-chat"]);
        assert!(args.server.is_none());
        assert!(args.upload.is_empty());
        assert!(!args.process);
        assert_eq!(args.save_dir, PathBuf::from("recommendations"));
    }

    #[test]
    fn test_args_parse_full() {
        let args = Args::parse_from([
            "wardrobe-chat",
            "--server",
            "http://192.168.1.20:8000",
            "--upload",
            "a.jpg",
            "--upload",
            "b.jpg",
            "--process",
            "--save-dir",
            "outfits",
        ]);
        assert_eq!(args.server.as_deref(), Some("http://192.168.1.20:8000"));
        assert_eq!(args.upload, vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]);
        assert!(args.process);
        assert_eq!(args.save_dir, PathBuf::from("outfits"));
    }

    #[test]
    fn test_args_upload_repeatable() {
        let args = Args::parse_from(["wardrobe-chat", "--upload", "x.png"]);
        assert_eq!(args.upload.len(), 1);
    }

    #[test]
    fn test_args_process_default_false() {
        let args = Args::parse_from(["wardrobe-chat"]);
        assert!(!args.process);
    }

    #[test]
    fn test_args_custom_save_dir() {
        let args = Args::parse_from(["wardrobe-chat", "--save-dir", "/tmp/looks"]);
        assert_eq!(args.save_dir, PathBuf::from("/tmp/looks"));
    }
}
