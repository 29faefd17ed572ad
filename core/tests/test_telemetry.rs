#[cfg(test)]
mod telemetry_snapshot_tests {
    use zsession_core::compression::{CodecConfig, StreamingSession};
    use zsession_core::telemetry::{SessionCounters, TelemetrySnapshot};

    fn make_counters() -> SessionCounters {
        SessionCounters {
            calls_feed: 3,
            calls_flush: 1,
            calls_finish: 1,
            bytes_plaintext: 1000,
            bytes_compressed: 250,
            ..SessionCounters::default()
        }
    }

    #[test]
    fn ratio_is_compressed_over_plaintext() {
        let snapshot = TelemetrySnapshot::from(&make_counters());
        assert!((snapshot.compression_ratio - 0.25).abs() < f64::EPSILON);
        assert_eq!(snapshot.bytes_saved(), 750);
    }

    #[test]
    fn empty_counters_have_zero_ratio() {
        let snapshot = TelemetrySnapshot::from(&SessionCounters::default());
        assert_eq!(snapshot.compression_ratio, 0.0);
        assert_eq!(snapshot.bytes_saved(), 0);
    }

    #[test]
    fn counters_merge_field_by_field() {
        let mut total = make_counters();
        total += make_counters();
        assert_eq!(total.calls_feed, 6);
        assert_eq!(total.bytes_plaintext, 2000);
        assert_eq!(total.bytes_compressed, 500);

        let mut decoded = SessionCounters::default();
        decoded.add_decode(10, 40);
        total += decoded;
        assert_eq!(total.calls_decode, 1);
        assert_eq!(total.bytes_decode_out, 40);
        assert_eq!(total.bytes_plaintext, 2000);
    }

    #[test]
    fn decode_traffic_does_not_move_the_ratio() {
        let mut counters = make_counters();
        counters.add_decode(250, 1000);
        counters.add_decode(250, 1000);
        let snapshot = TelemetrySnapshot::from(&counters);
        assert_eq!(snapshot.calls_feed, 3);
        assert_eq!(snapshot.calls_decode, 2);
        assert_eq!(snapshot.bytes_decode_in, 500);
        assert_eq!(snapshot.bytes_decode_out, 2000);
        assert_eq!(snapshot.bytes_plaintext, 1000);
        assert!((snapshot.compression_ratio - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn counters_without_decode_fields_still_parse() {
        let json = r#"{"calls_feed":1,"calls_flush":0,"calls_finish":1,"bytes_plaintext":10,"bytes_compressed":20}"#;
        let counters: SessionCounters = serde_json::from_str(json).unwrap();
        assert_eq!(counters.calls_decode, 0);
        assert_eq!(counters.bytes_compressed, 20);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = TelemetrySnapshot::from(&make_counters());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"bytes_plaintext\":1000"));
        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn session_snapshot_reflects_work_done() {
        let mut session = StreamingSession::new(CodecConfig::new()).unwrap();
        let mut emitted = session.feed(&[b'z'; 10_000]).unwrap().len();
        emitted += session.finish().unwrap().len();
        let snapshot = session.telemetry();
        assert_eq!(snapshot.bytes_plaintext, 10_000);
        assert_eq!(snapshot.bytes_compressed, emitted as u64);
        assert!(snapshot.compression_ratio < 0.1);
    }

    #[test]
    fn config_level_round_trips_through_json() {
        let config: CodecConfig = serde_json::from_str(r#"{"level":5}"#).unwrap();
        assert_eq!(config.level(), Some(5));
        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.level(), None);
        assert_eq!(serde_json::to_string(&CodecConfig::new().with_level(-1)).unwrap(), r#"{"level":-1}"#);
    }
}
