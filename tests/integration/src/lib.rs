//! End-to-end tests for xmlcodec.
//!
//! Everything here runs against real files in temporary directories; no
//! external services are needed.
//!
//! ```text
//! cargo test -p xmlcodec-integration
//! ```

use std::path::Path;
use std::sync::{Arc, Once};

use chrono::{DateTime, TimeZone, Utc};
use xmlcodec::{CodecConfig, MemorySink, ReaderMode, XmlCodec, xml_mapping};

static INIT: Once = Once::new();

/// Initialize tracing (once). `RUST_LOG` wins over the configured `LOG_LEVEL`.
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(CodecConfig::from_env().log_level)
                }),
            )
            .with_test_writer()
            .init();
    });
}

/// Window geometry stored in the settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Window {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Whether the window starts maximized.
    pub maximized: bool,
}

xml_mapping!(Window {
    attr width = "width",
    attr height = "height",
    elem maximized = "Maximized",
});

/// A remote server entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Server {
    /// Host name.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Optional display label.
    pub label: Option<String>,
    /// Whether TLS is required.
    pub secure: bool,
}

xml_mapping!(Server {
    attr host = "host",
    attr port = "port",
    opt_attr label = "label",
    elem secure = "Secure",
});

/// Application settings, the kind of object graph the codec is used for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings {
    /// Schema version.
    pub version: u32,
    /// Active profile, if any.
    pub profile: Option<String>,
    /// User name.
    pub name: String,
    /// Last modification time.
    pub updated: DateTime<Utc>,
    /// Optional proxy URL.
    pub proxy: Option<String>,
    /// Main window geometry.
    pub window: Window,
    /// Recently opened files, newest first.
    pub recent: Vec<String>,
    /// Known servers.
    pub servers: Vec<Server>,
}

xml_mapping!(AppSettings as "Settings" {
    attr version = "version",
    opt_attr profile = "profile",
    elem name = "Name",
    elem updated = "Updated",
    opt proxy = "Proxy",
    elem window = "Window",
    list recent = "Recent",
    list servers = "Server",
});

/// A fully populated settings value.
#[must_use]
pub fn sample_settings() -> AppSettings {
    AppSettings {
        version: 4,
        profile: Some("work \"main\"".to_owned()),
        name: "Ada <admin> & co".to_owned(),
        updated: Utc
            .with_ymd_and_hms(2024, 5, 17, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
        proxy: None,
        window: Window {
            width: 1280,
            height: 800,
            maximized: true,
        },
        recent: vec![
            "/home/ada/notes.txt".to_owned(),
            "  leading and trailing  ".to_owned(),
        ],
        servers: vec![
            Server {
                host: "alpha.example.org".to_owned(),
                port: 443,
                label: Some("Primary".to_owned()),
                secure: true,
            },
            Server {
                host: "10.0.0.7".to_owned(),
                port: 8080,
                label: None,
                secure: false,
            },
        ],
    }
}

/// Build a codec rooted at `dir` that records failures in memory.
#[must_use]
pub fn codec_in(dir: &Path, mode: ReaderMode) -> (XmlCodec, Arc<MemorySink>) {
    init_tracing();

    let sink = Arc::new(MemorySink::new());
    let config = CodecConfig::builder()
        .reader_mode(mode)
        .base_dir(dir.to_path_buf())
        .build();
    let codec = XmlCodec::new(config).with_sink(sink.clone());
    (codec, sink)
}

/// Build a codec with the default configuration that records failures in memory.
#[must_use]
pub fn memory_codec() -> (XmlCodec, Arc<MemorySink>) {
    init_tracing();

    let sink = Arc::new(MemorySink::new());
    let codec = XmlCodec::default().with_sink(sink.clone());
    (codec, sink)
}

mod test_file;
mod test_roundtrip;
