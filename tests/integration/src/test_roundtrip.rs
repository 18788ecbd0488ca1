//! String round-trip tests.

#[cfg(test)]
mod tests {
    use xmlcodec::{CodecError, XmlRoot};

    use crate::{AppSettings, Server, memory_codec, sample_settings};

    #[test]
    fn test_should_round_trip_settings_through_string() {
        let (codec, sink) = memory_codec();
        let value = sample_settings();

        let xml = codec.serialize(&value).expect("serialize");
        let back = codec.deserialize(&xml, AppSettings::default());

        assert_eq!(back, value);
        assert!(sink.is_empty(), "unexpected reports: {:?}", sink.reports());
    }

    #[test]
    fn test_should_write_expected_document_shape() {
        let (codec, _sink) = memory_codec();
        let xml = codec.serialize(&sample_settings()).expect("serialize");

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<Settings version="4" profile="work &quot;main&quot;">"#));
        assert!(xml.contains("<Name>Ada &lt;admin&gt; &amp; co</Name>"));
        assert!(xml.contains("<Updated>2024-05-17T09:30:00Z</Updated>"));
        assert!(xml.contains(r#"<Window width="1280" height="800">"#));
        assert!(xml.contains(r#"<Server host="10.0.0.7" port="8080">"#));
        assert!(!xml.contains("<Proxy>"));
        assert_eq!(xml.matches("<Recent>").count(), 2);
    }

    #[test]
    fn test_should_serialize_identically_on_every_call() {
        let (codec, _sink) = memory_codec();
        let value = sample_settings();
        let first = codec.serialize(&value).expect("serialize");
        let second = codec.serialize(&value).expect("serialize");
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_should_write_compact_output_when_indent_is_zero() {
        let codec = xmlcodec::XmlCodec::new(
            xmlcodec::CodecConfig::builder().indent(0).build(),
        );
        let xml = codec.serialize(&sample_settings()).expect("serialize");
        assert!(!xml.contains('\n'));
        assert_eq!(codec.deserialize(&xml, AppSettings::default()), sample_settings());
    }

    #[test]
    fn test_should_use_type_name_as_default_root() {
        let (codec, _sink) = memory_codec();
        let server = Server {
            host: "h".to_owned(),
            port: 1,
            label: None,
            secure: false,
        };
        let xml = codec.serialize(&server).expect("serialize");
        assert_eq!(Server::root_name(), "Server");
        assert!(xml.contains(r#"<Server host="h" port="1">"#));
    }

    #[test]
    fn test_should_serialize_present_option_root_as_its_value() {
        let (codec, sink) = memory_codec();
        let xml = codec.serialize(&Some(sample_settings())).expect("serialize");
        let back: Option<AppSettings> = codec.deserialize(&xml, None);
        assert_eq!(back, Some(sample_settings()));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_should_skip_unknown_elements_from_newer_writers() {
        let (codec, sink) = memory_codec();
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- written by a newer release -->
<Settings version="5" theme="dark">
  <Name>Grace</Name>
  <Updated>2024-01-01T00:00:00.000Z</Updated>
  <Plugins><Plugin id="x"><Enabled>true</Enabled></Plugin></Plugins>
  <Window width="640" height="480"><Maximized>false</Maximized><Dpi>96</Dpi></Window>
</Settings>"#;

        let value: AppSettings = codec.deserialize_or_default(xml);

        assert_eq!(value.version, 5);
        assert_eq!(value.name, "Grace");
        assert_eq!(value.window.width, 640);
        assert!(value.recent.is_empty());
        assert!(value.servers.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_should_resolve_cdata_and_character_references() {
        let (codec, _sink) = memory_codec();
        let xml = r#"<Settings version="1">
  <Name><![CDATA[a <raw> name]]> &#x2713;</Name>
  <Updated>2024-01-01T00:00:00Z</Updated>
  <Window width="1" height="1"><Maximized>1</Maximized></Window>
</Settings>"#;

        let value: AppSettings = codec.try_deserialize(xml).expect("deserialize");
        assert_eq!(value.name, "a <raw> name \u{2713}");
        assert!(value.window.maximized);
    }

    #[test]
    fn test_should_reject_wrong_root_name_as_mapping_error() {
        let (codec, _sink) = memory_codec();
        let err = codec
            .try_deserialize::<AppSettings>("<Preferences version=\"1\"/>")
            .unwrap_err();
        assert!(matches!(err, CodecError::Mapping(_)));
    }
}
