//! File round-trip tests over real temporary directories.

#[cfg(test)]
mod tests {
    use std::fs;

    use xmlcodec::{CodecError, ReaderMode};

    use crate::{AppSettings, codec_in, sample_settings};

    const MODES: [ReaderMode; 2] = [ReaderMode::Buffered, ReaderMode::Streaming];

    #[test]
    fn test_should_round_trip_settings_through_file_in_both_modes() {
        let dir = tempfile::tempdir().expect("tempdir");
        for mode in MODES {
            let (codec, sink) = codec_in(dir.path(), mode);
            let file = format!("settings-{mode}.xml");

            assert!(codec.serialize_to_file(&file, &sample_settings()));
            let back = codec.deserialize_file(&file, AppSettings::default());

            assert_eq!(back, sample_settings(), "mode {mode}");
            assert!(sink.is_empty(), "mode {mode}: {:?}", sink.reports());
        }
    }

    #[test]
    fn test_should_write_same_bytes_as_string_form() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (codec, _sink) = codec_in(dir.path(), ReaderMode::Buffered);

        let path = codec
            .try_serialize_to_file("settings.xml", &sample_settings(), true)
            .expect("write");
        let on_disk = fs::read_to_string(&path).expect("read back");

        assert_eq!(path, dir.path().join("settings.xml"));
        assert_eq!(on_disk, codec.serialize(&sample_settings()).expect("serialize"));
    }

    #[test]
    fn test_should_replace_existing_file_when_overwriting() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (codec, sink) = codec_in(dir.path(), ReaderMode::Buffered);
        let target = dir.path().join("settings.xml");
        fs::write(&target, "x".repeat(64 * 1024)).expect("seed");

        assert!(codec.serialize_to_file("settings.xml", &sample_settings()));

        let loaded: AppSettings = codec.deserialize_file_or_default("settings.xml");
        assert_eq!(loaded, sample_settings());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_should_leave_existing_file_untouched_without_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (codec, sink) = codec_in(dir.path(), ReaderMode::Buffered);
        let target = dir.path().join("settings.xml");
        fs::write(&target, "keep me").expect("seed");

        assert!(!codec.serialize_to_file_with("settings.xml", &sample_settings(), false));

        assert_eq!(fs::read_to_string(&target).expect("read"), "keep me");
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.last().expect("report").kind, "file_conflict");
    }

    #[test]
    fn test_should_create_new_file_without_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (codec, sink) = codec_in(dir.path(), ReaderMode::Streaming);

        assert!(codec.serialize_to_file_with("fresh.xml", &sample_settings(), false));
        assert!(dir.path().join("fresh.xml").is_file());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_should_return_default_silently_for_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        for mode in MODES {
            let (codec, sink) = codec_in(dir.path(), mode);
            let fallback = sample_settings();

            let value = codec.deserialize_file("does-not-exist.xml", fallback.clone());

            assert_eq!(value, fallback);
            assert!(sink.is_empty(), "missing file must not be reported");
            assert!(matches!(
                codec.try_deserialize_file::<AppSettings>("does-not-exist.xml"),
                Err(CodecError::NotFound { .. })
            ));
        }
    }

    #[test]
    fn test_should_normalize_relative_paths_against_base_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("conf")).expect("mkdir");
        let (codec, sink) = codec_in(dir.path(), ReaderMode::Buffered);

        let path = codec
            .try_serialize_to_file("conf/./../conf/settings.xml", &sample_settings(), true)
            .expect("write");

        assert_eq!(path, dir.path().join("conf").join("settings.xml"));
        let loaded: AppSettings = codec.deserialize_file_or_default("conf/settings.xml");
        assert_eq!(loaded, sample_settings());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_should_accept_absolute_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let other = tempfile::tempdir().expect("tempdir");
        let (codec, sink) = codec_in(dir.path(), ReaderMode::Buffered);
        let target = other.path().join("abs.xml");

        assert!(codec.serialize_to_file(&target, &sample_settings()));
        assert_eq!(
            codec.deserialize_file(&target, AppSettings::default()),
            sample_settings()
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_should_reject_truncated_file_identically_in_both_modes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (writer, _sink) = codec_in(dir.path(), ReaderMode::Buffered);
        let full = writer.serialize(&sample_settings()).expect("serialize");
        fs::write(dir.path().join("cut.xml"), &full[..full.len() / 2]).expect("seed");

        for mode in MODES {
            let (codec, sink) = codec_in(dir.path(), mode);
            let value = codec.deserialize_file("cut.xml", AppSettings::default());
            assert_eq!(value, AppSettings::default());
            assert_eq!(sink.len(), 1, "mode {mode}");
            assert_eq!(sink.last().expect("report").kind, "malformed_document");
        }
    }

    #[test]
    fn test_should_write_distinct_files_concurrently() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (codec, sink) = codec_in(dir.path(), ReaderMode::Streaming);

        std::thread::scope(|scope| {
            for i in 0..8_u32 {
                let codec = &codec;
                scope.spawn(move || {
                    let mut value = sample_settings();
                    value.version = i;
                    let file = format!("worker-{i}.xml");
                    assert!(codec.serialize_to_file(&file, &value));
                    let back = codec.deserialize_file(&file, AppSettings::default());
                    assert_eq!(back.version, i);
                });
            }
        });

        assert!(sink.is_empty());
        let written = fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(written, 8);
    }
}
