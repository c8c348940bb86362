//! Reference vectors for the settings packet.
//!
//! The two configurations below were captured from a working device setup
//! and pin the field layout and every scale factor.

use chrono::{NaiveDate, NaiveDateTime};
use dt174b_protocol::*;

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2013, 2, 5)
        .and_then(|d| d.and_hms_opt(9, 5, 24))
        .expect("valid timestamp")
}

fn default_settings() -> SettingsInput {
    SettingsInput {
        datetime: timestamp(),
        rec_interval: Some(10),
        alm_interval: Some(10),
        sample_interval: 1,
        auto_start: false,
        temp_low: 5.5,
        temp_high: 40.5,
        hum_low: 30.5,
        hum_high: 90.5,
        pressure_low: 700.0,
        pressure_high: 1100.0,
        altitude_adjust: 0.0,
        sample_count: 10_000,
    }
}

fn edge_settings() -> SettingsInput {
    SettingsInput {
        datetime: timestamp(),
        rec_interval: None,
        alm_interval: None,
        sample_interval: 17 * 60 + 59,
        auto_start: true,
        temp_low: -40.0,
        temp_high: 70.0,
        hum_low: 0.0,
        hum_high: 100.0,
        pressure_low: 700.0,
        pressure_high: 1100.0,
        altitude_adjust: -9999.0,
        sample_count: 10,
    }
}

/// Compare against an expected dump written in groups, ignoring the spaces.
fn assert_packet(packet: &SettingsPacket, expected: &str) {
    let expected: String = expected.split_whitespace().collect();
    assert_eq!(packet.to_string(), expected);
}

fn read_i16(packet: &SettingsPacket, offset: usize) -> i16 {
    let bytes = packet.as_bytes();
    i16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u16(packet: &SettingsPacket, offset: usize) -> u16 {
    let bytes = packet.as_bytes();
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

#[test]
fn test_default_vector() {
    let packet = encode(&default_settings()).expect("default settings encode");
    assert_packet(
        &packet,
        "18 05 09 \
         05 02 07dd \
         ff ff ff \
         0a 0a \
         0001 00 \
         0fd2 0226 \
         0389 0131 \
         0364 f3c4 \
         5a \
         0000 2710",
    );
}

#[test]
fn test_edge_vector() {
    let packet = encode(&edge_settings()).expect("edge settings encode");
    assert_packet(
        &packet,
        "18 05 09 \
         05 02 07dd \
         ff ff ff \
         ff ff \
         0437 01 \
         1b58 f060 \
         03e8 0000 \
         0364 f3c4 \
         5a \
         d8f1 000a",
    );
}

#[test]
fn test_factory_defaults_match_default_vector() {
    assert_eq!(SettingsInput::default_at(timestamp()), default_settings());
}

#[test]
fn test_packet_size() {
    let packet = encode(&default_settings()).unwrap();
    assert_eq!(packet.as_bytes().len(), SETTINGS_PACKET_SIZE);
    assert_eq!(packet.to_vec().len(), 32);
}

#[test]
fn test_disabled_intervals_are_sentinel() {
    for base in [default_settings(), edge_settings()] {
        for auto_start in [false, true] {
            let input = SettingsInput {
                rec_interval: None,
                alm_interval: None,
                auto_start,
                ..base.clone()
            };
            let packet = encode(&input).unwrap();
            assert_eq!(packet.as_bytes()[OFFSET_REC_INTERVAL], LED_DISABLED);
            assert_eq!(packet.as_bytes()[OFFSET_ALM_INTERVAL], LED_DISABLED);
        }
    }

    // Only the disabled one turns into the sentinel
    let input = SettingsInput {
        rec_interval: Some(3),
        alm_interval: None,
        ..default_settings()
    };
    let packet = encode(&input).unwrap();
    assert_eq!(packet.as_bytes()[OFFSET_REC_INTERVAL], 3);
    assert_eq!(packet.as_bytes()[OFFSET_ALM_INTERVAL], 0xff);
}

#[test]
fn test_sample_interval_boundary() {
    let input = SettingsInput {
        sample_interval: MAX_SAMPLE_INTERVAL_S,
        ..default_settings()
    };
    let packet = encode(&input).unwrap();
    assert_eq!(read_u16(&packet, OFFSET_SAMPLE_INTERVAL), 0x0437);

    let input = SettingsInput {
        sample_interval: MAX_SAMPLE_INTERVAL_S + 1,
        ..default_settings()
    };
    assert_eq!(
        encode(&input),
        Err(EncodeError::OutOfRange("sample_interval"))
    );
}

#[test]
fn test_encoding_is_deterministic() {
    let input = edge_settings();
    let first = encode(&input).unwrap();
    let second = encode(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(SettingsPacket::try_from(&input).unwrap(), first);
    assert_eq!(input.encode().unwrap(), first);
}

#[test]
fn test_out_of_range_reports_field() {
    let with = |change: fn(&mut SettingsInput)| {
        let mut input = default_settings();
        change(&mut input);
        input
    };
    let cases: Vec<(SettingsInput, &str)> = vec![
        (with(|s| s.temp_high = 400.0), "temp_high"),
        (with(|s| s.temp_low = -400.0), "temp_low"),
        (with(|s| s.hum_high = 7000.0), "hum_high"),
        (with(|s| s.hum_low = -1.0), "hum_low"),
        (with(|s| s.pressure_high = 5000.0), "pressure_high"),
        (with(|s| s.pressure_low = -3000.0), "pressure_low"),
        (with(|s| s.altitude_adjust = 40000.0), "altitude_adjust"),
        (with(|s| s.rec_interval = Some(0)), "rec_interval"),
        (with(|s| s.alm_interval = Some(300)), "alm_interval"),
        (with(|s| s.sample_count = 70_000), "sample_count"),
    ];

    for (input, field) in cases {
        assert_eq!(encode(&input), Err(EncodeError::OutOfRange(field)), "{field}");
    }
}

#[test]
fn test_thresholds_are_not_cross_checked() {
    // Inverted thresholds are the caller's problem
    let input = SettingsInput {
        temp_low: 50.0,
        temp_high: -10.0,
        ..default_settings()
    };
    let packet = encode(&input).unwrap();
    assert_eq!(read_i16(&packet, OFFSET_TEMP_HIGH), -1000);
    assert_eq!(read_i16(&packet, OFFSET_TEMP_LOW), 5000);
}

#[test]
fn test_transforms_are_monotonic() {
    let mut prev_temp = i16::MIN;
    let mut prev_hum = 0u16;
    let mut prev_pressure = i16::MIN;
    let mut prev_alt = i16::MIN;

    for step in 0..=1100 {
        let x = f64::from(step) / 10.0;
        let input = SettingsInput {
            temp_high: x - 40.0,
            hum_high: x / 1.1,
            pressure_high: 700.0 + x * 4.0,
            altitude_adjust: x * 10.0 - 500.0,
            ..default_settings()
        };
        let packet = encode(&input).unwrap();

        let temp = read_i16(&packet, OFFSET_TEMP_HIGH);
        let hum = read_u16(&packet, OFFSET_HUM_HIGH);
        let pressure = read_i16(&packet, OFFSET_PRESSURE_HIGH);
        let alt = read_i16(&packet, OFFSET_ALTITUDE);

        assert!(temp >= prev_temp, "temperature at {x}");
        assert!(hum >= prev_hum, "humidity at {x}");
        assert!(pressure >= prev_pressure, "pressure at {x}");
        assert!(alt >= prev_alt, "altitude at {x}");

        prev_temp = temp;
        prev_hum = hum;
        prev_pressure = pressure;
        prev_alt = alt;
    }
}
