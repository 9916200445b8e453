//! Decode real-world reports end to end

use assert_approx_eq::assert_approx_eq;
use chrono::{DateTime, TimeZone, Utc};

use wxmetar::{
    Decoder, DecoderBuilder, Descriptor, Distance, GroupFault, GroupKind, Intensity, Observation,
    ParseError, Phenomenon, ReportModifier, ReportType, RvrTendency, SkyCover, SpeedUnit,
    WindDirection,
};

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap()
}

fn decoder() -> Decoder {
    DecoderBuilder::new().with_reference_time(reference()).build()
}

fn decode(report: &str) -> Observation {
    match decoder().decode(report) {
        Ok(obs) => obs,
        Err(err) => panic!("failed to decode \"{}\": {}", report, err),
    }
}

fn sky_heights(obs: &Observation) -> Vec<Option<u32>> {
    obs.sky_conditions().iter().map(|s| s.height_feet()).collect()
}

#[test]
fn test_north_american() {
    let obs = decode("KLAX 060250Z 34010KT 10SM CLR 14/M07 A3012");
    assert_eq!("KLAX", obs.station_id());
    assert_eq!(None, obs.report_type());
    assert_eq!(None, obs.report_modifier());
    assert_eq!(
        Some(Utc.with_ymd_and_hms(2024, 3, 6, 2, 50, 0).unwrap()),
        obs.observed_at()
    );

    let wind = obs.wind().unwrap();
    assert_eq!(WindDirection::Degrees(340), wind.direction());
    assert_eq!(10, wind.speed());
    assert_eq!(None, wind.gust());
    assert_eq!(SpeedUnit::Knots, wind.unit());
    assert_eq!(None, wind.variable_range());

    let vis = obs.visibility().unwrap();
    assert_eq!(Distance::StatuteMiles(10.0), vis.distance());
    assert!(!vis.less_than());

    assert_eq!(1, obs.sky_conditions().len());
    assert_eq!(SkyCover::Clear, obs.sky_conditions()[0].cover());
    assert!(obs.weather_conditions().is_empty());

    assert_eq!(Some(14.0), obs.temperature_c());
    assert_eq!(Some(-7.0), obs.dew_point_c());
    assert_approx_eq!(57.2f32, obs.temperature_f().unwrap(), 1.0e-4);
    assert_approx_eq!(19.4f32, obs.dew_point_f().unwrap(), 1.0e-4);
    assert_approx_eq!(30.12f32, obs.pressure_inhg().unwrap());
    assert_eq!(None, obs.pressure_hpa());
    assert!(!obs.is_no_significant_change());
    assert_eq!(None, obs.remarks());
    assert_eq!("KLAX 060250Z 34010KT 10SM CLR 14/M07 A3012", obs.raw_report());
}

#[test]
fn test_fog_vertical_visibility() {
    let obs = decode("KMYV 231200Z AUTO 00000KT M1/4SM FG VV003 03/03 A3027");
    assert_eq!(Some(ReportModifier::Automated), obs.report_modifier());
    assert!(obs.wind().unwrap().is_calm());

    let vis = obs.visibility().unwrap();
    assert_eq!(Distance::StatuteMiles(0.25), vis.distance());
    assert!(vis.less_than());

    let wx = obs.weather_conditions();
    assert_eq!(1, wx.len());
    assert_eq!(Intensity::Moderate, wx[0].intensity());
    assert_eq!(None, wx[0].descriptor());
    assert_eq!(Phenomenon::Fog, wx[0].phenomenon());

    let sky = &obs.sky_conditions()[0];
    assert_eq!(SkyCover::VerticalVisibility, sky.cover());
    assert_eq!(Some(3), sky.height_hundreds_of_feet());
    assert_eq!(Some(300), sky.height_feet());

    assert_eq!(Some(3.0), obs.temperature_c());
    assert_eq!(Some(3.0), obs.dew_point_c());
}

#[test]
fn test_cavok_qnh() {
    let obs = decode("EGPF 280320Z 30008KT CAVOK 01/M03 Q1006");
    let vis = obs.visibility().unwrap();
    assert!(vis.is_cavok());
    assert_eq!(Distance::Kilometers(10.0), vis.distance());
    assert!(obs.sky_conditions().is_empty());
    assert_eq!(Some(1006), obs.pressure_hpa());
    assert_approx_eq!(29.71f32, obs.pressure_inhg().unwrap(), 1.0e-2);
}

#[test]
fn test_gust_and_meters() {
    let obs = decode("EGBJ 200850Z 23007G17KT 4000NE RADZ BKN009 BKN015 15/14 Q1006");

    let wind = obs.wind().unwrap();
    assert_eq!(WindDirection::Degrees(230), wind.direction());
    assert_eq!(7, wind.speed());
    assert_eq!(Some(17), wind.gust());

    assert_eq!(Distance::Meters(4000.0), obs.visibility().unwrap().distance());

    let wx = obs.weather_conditions();
    assert_eq!(1, wx.len());
    assert_eq!(Phenomenon::Rain, wx[0].phenomenon());

    assert!(obs
        .sky_conditions()
        .iter()
        .all(|s| s.cover() == SkyCover::Broken));
    assert_eq!(vec![Some(900), Some(1500)], sky_heights(&obs));
    assert_eq!(Some(15.0), obs.temperature_c());
    assert_eq!(Some(14.0), obs.dew_point_c());
}

#[test]
fn test_multiple_weather_and_sky() {
    let obs = decode(
        "LOWW 072050Z 15002KT 4000 -SN BR FEW008 SCT011 BKN067 M05/M06 Q1020 NOSIG 11490531 16490336",
    );

    let wx = obs.weather_conditions();
    assert_eq!(2, wx.len());
    assert_eq!(Intensity::Light, wx[0].intensity());
    assert_eq!(Phenomenon::Snow, wx[0].phenomenon());
    assert_eq!(Intensity::Moderate, wx[1].intensity());
    assert_eq!(Phenomenon::Mist, wx[1].phenomenon());

    let covers: Vec<_> = obs.sky_conditions().iter().map(|s| s.cover()).collect();
    assert_eq!(
        vec![SkyCover::Few, SkyCover::Scattered, SkyCover::Broken],
        covers
    );
    assert_eq!(vec![Some(800), Some(1100), Some(6700)], sky_heights(&obs));

    assert_eq!(Some(-5.0), obs.temperature_c());
    assert_eq!(Some(-6.0), obs.dew_point_c());
    assert_eq!(Some(1020), obs.pressure_hpa());
    assert!(obs.is_no_significant_change());
}

#[test]
fn test_meters_per_second() {
    let obs = decode("KLAX 060250Z 34020MPS 10SM CLR 14/M07 A3012");
    let wind = obs.wind().unwrap();
    assert_eq!(SpeedUnit::MetersPerSecond, wind.unit());
    assert_eq!(20, wind.speed());
    assert_approx_eq!(20.0f32, wind.speed_mps());
}

#[test]
fn test_nosig_and_nsc() {
    let obs = decode("EDDB 280320Z 21003KT 2300 BR FEW028 SCT062 01/M03 Q1000 NOSIG");
    assert_eq!(Distance::Meters(2300.0), obs.visibility().unwrap().distance());
    assert_eq!(Phenomenon::Mist, obs.weather_conditions()[0].phenomenon());
    assert_eq!(vec![Some(2800), Some(6200)], sky_heights(&obs));
    assert!(obs.is_no_significant_change());

    let obs = decode("EDDB 280320Z 21003KT 2300 NSC 01/M03 Q1000");
    assert!(obs.weather_conditions().is_empty());
    assert_eq!(1, obs.sky_conditions().len());
    assert_eq!(SkyCover::NoSignificantClouds, obs.sky_conditions()[0].cover());
    assert_eq!(None, obs.sky_conditions()[0].height_feet());
    assert!(!obs.is_no_significant_change());
}

#[test]
fn test_missing_temperatures() {
    let obs = decode("KWHP 260050Z 16008KT 10SM SKC /28 A2993");
    assert_eq!(SkyCover::SkyClear, obs.sky_conditions()[0].cover());
    assert_eq!(None, obs.temperature_c());
    assert_eq!(Some(28.0), obs.dew_point_c());
    assert_eq!(None, obs.temperature_f());

    let obs = decode("KWHP 260050Z 16008KT 10SM SKC 28/ A2993");
    assert_eq!(Some(28.0), obs.temperature_c());
    assert_eq!(None, obs.dew_point_c());
    assert_approx_eq!(29.93f32, obs.pressure_inhg().unwrap());

    let obs = decode("KWHP 260050Z 16008KT 10SM SKC / A2993");
    assert_eq!(None, obs.temperature_c());
    assert_eq!(None, obs.dew_point_c());
    assert_approx_eq!(29.93f32, obs.pressure_inhg().unwrap());

    let obs = decode("KXYZ 060250Z 34010KT 10SM CLR 15/// A3012");
    assert_eq!(Some(15.0), obs.temperature_c());
    assert_eq!(None, obs.dew_point_c());
    assert_approx_eq!(30.12f32, obs.pressure_inhg().unwrap());

    let obs = decode("KXYZ 060250Z 34010KT 10SM CLR ///// A3012");
    assert_eq!(None, obs.temperature_c());
    assert_eq!(None, obs.dew_point_c());
    assert_approx_eq!(30.12f32, obs.pressure_inhg().unwrap());
}

#[test]
fn test_precise_temperature_remarks() {
    let obs = decode("K12N 260654Z AUTO 00000KT 13/12 A3032 RMK AO2 SLP264 T01330117 PWINO TSNO");
    assert_eq!(None, obs.visibility());
    assert!(obs.sky_conditions().is_empty());
    assert!(obs.weather_conditions().is_empty());
    assert!(obs.obscurations().is_empty());

    assert_eq!(Some(13.0), obs.temperature_c());
    assert_eq!(Some(12.0), obs.dew_point_c());
    assert_approx_eq!(13.3f32, obs.temperature_precise_c().unwrap());
    assert_approx_eq!(11.7f32, obs.dew_point_precise_c().unwrap());
    assert_approx_eq!(13.3f32, obs.temperature_most_precise_c().unwrap());
    assert_approx_eq!(11.7f32, obs.dew_point_most_precise_c().unwrap());
    assert_approx_eq!(30.32f32, obs.pressure_inhg().unwrap());
    assert_eq!(
        Some("AO2 SLP264 T01330117 PWINO TSNO"),
        obs.remarks()
    );

    let obs = decode("KLAX 060250Z 34010KT 10SM CLR 14/M07 A3012 RMK T01441072");
    assert_eq!(Some(14.0), obs.temperature_c());
    assert_approx_eq!(14.4f32, obs.temperature_precise_c().unwrap());
    assert_approx_eq!(-7.2f32, obs.dew_point_precise_c().unwrap());
    assert_approx_eq!(57.92f32, obs.temperature_f().unwrap(), 1.0e-4);
}

#[test]
fn test_becoming_trend() {
    let obs = decode("EGDL 030050Z 19006KT CAVOK 14/11 Q1018 BECMG 7000 HZ");
    assert!(obs.visibility().unwrap().is_cavok());
    assert_eq!(Some("BECMG 7000 HZ"), obs.becoming_trend());
    assert_eq!(Some(1018), obs.pressure_hpa());
    assert_approx_eq!(30.06f32, obs.pressure_inhg().unwrap(), 1.0e-2);

    // trend tokens are not swept for obscurations
    assert!(obs.obscurations().is_empty());

    let obs = decode("EGDL 030050Z 19006KT CAVOK 14/11 Q1018 becmg 7000 HZ RMK FG");
    assert_eq!(Some("becmg 7000 HZ"), obs.becoming_trend());
    assert_eq!(Some("FG"), obs.remarks());
    assert_eq!(1, obs.obscurations().len());
}

#[test]
fn test_variable_without_unit() {
    let obs = decode("KPAO 231647Z VRB05 30SM FEW150 20/12 A3005");
    let wind = obs.wind().unwrap();
    assert_eq!(WindDirection::Variable, wind.direction());
    assert_eq!(5, wind.speed());
    assert_eq!(SpeedUnit::Knots, wind.unit());
    assert_eq!(Distance::StatuteMiles(30.0), obs.visibility().unwrap().distance());
    assert_eq!(vec![Some(15000)], sky_heights(&obs));
}

#[test]
fn test_missing_visibility_and_weather() {
    let obs = decode("KHSA 160019Z AUTO 02017KT 23/22 A2949 RMK");
    assert_eq!(None, obs.visibility());
    assert!(obs.weather_conditions().is_empty());
    assert!(obs.sky_conditions().is_empty());
    assert_eq!(Some(23.0), obs.temperature_c());
    assert_eq!(Some(22.0), obs.dew_point_c());
    assert_eq!(None, obs.remarks());
}

#[test]
fn test_fractional_visibility() {
    let obs = decode("KVCB 300615Z AUTO 00000KT 2 1/2SM RA CLR 06/06 A3017 RMK AO2");
    let vis = obs.visibility().unwrap();
    assert_eq!(Distance::StatuteMiles(2.5), vis.distance());
    assert!(!vis.less_than());
    assert_eq!(Phenomenon::Rain, obs.weather_conditions()[0].phenomenon());
    assert_eq!(SkyCover::Clear, obs.sky_conditions()[0].cover());
    assert_eq!(Some("AO2"), obs.remarks());

    let obs = decode("KLAX 060250Z 34010KT 1 1/2KM BR CLR 14/M07 A3012");
    let vis = obs.visibility().unwrap();
    assert_eq!(Distance::Kilometers(1.5), vis.distance());
    assert_approx_eq!(1500.0f32, vis.meters(), 1.0e-2);
}

#[test]
fn test_cloud_modifiers() {
    let obs = decode("LOXT 062050Z VRB03KT 10KM FEW060SC BKN120AC M10/M12 Q1025 BNK");
    assert_eq!(Distance::Kilometers(10.0), obs.visibility().unwrap().distance());
    let modifiers: Vec<_> = obs.sky_conditions().iter().map(|s| s.modifier()).collect();
    assert_eq!(vec![Some("SC"), Some("AC")], modifiers);
    assert_eq!(vec![Some(6000), Some(12000)], sky_heights(&obs));
    assert_eq!(Some(-10.0), obs.temperature_c());
    assert_eq!(Some(-12.0), obs.dew_point_c());
}

#[test]
fn test_runway_visual_range_and_obscuration() {
    let obs = decode(
        "KSFO 061756Z 28015G25KT 250V310 1/2SM R28L/2400V4000FT/U FG OVC002 12/11 A2990 RMK FG SCT000",
    );

    let range = obs.wind().unwrap().variable_range().unwrap();
    assert_eq!(250, range.min());
    assert_eq!(310, range.max());
    assert_eq!(Distance::StatuteMiles(0.5), obs.visibility().unwrap().distance());

    let rvr = obs.runway_visual_ranges();
    assert_eq!(1, rvr.len());
    assert_eq!(28, rvr[0].runway_number());
    assert_eq!(2400, rvr[0].lowest_reportable());
    assert_eq!(Some(4000), rvr[0].highest_reportable());
    assert_eq!(Some(RvrTendency::Up), rvr[0].tendency());

    assert_eq!(Phenomenon::Fog, obs.weather_conditions()[0].phenomenon());
    assert_eq!(vec![Some(200)], sky_heights(&obs));

    let obsc = obs.obscurations();
    assert_eq!(1, obsc.len());
    assert_eq!(Phenomenon::Fog, obsc[0].phenomenon());
    assert_eq!(Some(SkyCover::Scattered), obsc[0].cover());
    assert_eq!(Some(0), obsc[0].height_hundreds_of_feet());
}

#[test]
fn test_qnh_then_altimeter() {
    let obs = decode("EGLL 061750Z 24012KT 9999 FEW040 14/08 Q1015 A2997");
    assert_eq!(Distance::Kilometers(10.0), obs.visibility().unwrap().distance());
    assert!(!obs.visibility().unwrap().is_cavok());
    assert_eq!(Some(1015), obs.pressure_hpa());
    assert_approx_eq!(29.97f32, obs.pressure_inhg().unwrap());
}

#[test]
fn test_report_type_and_modifier() {
    let obs = decode("METAR LFPG 061730Z 20010KT 9999 SCT030 15/09 Q1012 NOSIG");
    assert_eq!(Some(ReportType::Metar), obs.report_type());
    assert_eq!("LFPG", obs.station_id());
    assert!(obs.is_no_significant_change());

    let obs = decode("SPECI KORD 061812Z COR 31022G34KT 3SM +TSRA BKN015CB 18/16 A2981");
    assert_eq!(Some(ReportType::Special), obs.report_type());
    assert_eq!(Some(ReportModifier::Corrected), obs.report_modifier());
    let wx = &obs.weather_conditions()[0];
    assert_eq!(Intensity::Heavy, wx.intensity());
    assert_eq!(Some(Descriptor::Thunderstorm), wx.descriptor());
    assert_eq!(Phenomenon::Rain, wx.phenomenon());
    assert_eq!(Some("CB"), obs.sky_conditions()[0].modifier());
}

#[test]
fn test_date_line() {
    let obs = decoder()
        .decode_record("2024/03/06 02:56\nKLAX 060250Z 34010KT 10SM CLR 14/M07 A3012\n")
        .unwrap();
    assert_eq!(Some("2024/03/06 02:56"), obs.raw_date_line());
    assert_eq!(
        Some(Utc.with_ymd_and_hms(2024, 3, 6, 2, 56, 0).unwrap()),
        obs.record_date()
    );
    assert_eq!(
        Some(Utc.with_ymd_and_hms(2024, 3, 6, 2, 50, 0).unwrap()),
        obs.observed_at()
    );

    // a day later than the reference is from last month
    let obs = DecoderBuilder::new()
        .with_reference_time(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())
        .build()
        .decode("EGBJ 300850Z 23007KT")
        .unwrap();
    assert_eq!(
        Some(Utc.with_ymd_and_hms(2024, 3, 30, 8, 50, 0).unwrap()),
        obs.observed_at()
    );
}

#[test]
fn test_errors() {
    let cases = [
        ("KLAX 060250Z 340X0KT", GroupKind::Wind, "340X0KT", GroupFault::Number),
        ("KLAX 0602Z 34010KT", GroupKind::DateTime, "0602Z", GroupFault::Truncated),
        (
            "KLAX 060250Z 34010KT 10SM CLR 1X/M07 A3012",
            GroupKind::Temperature,
            "1X/M07",
            GroupFault::Number,
        ),
        (
            "KLAX 060250Z 34010KT 10SM CLR 14/M07 A30X2",
            GroupKind::Pressure,
            "A30X2",
            GroupFault::Number,
        ),
        (
            "KLAX 060250Z 34010KT 10SM BKN0X0 14/M07 A3012",
            GroupKind::Sky,
            "BKN0X0",
            GroupFault::Number,
        ),
        (
            "KLAX 060250Z 34010KT 1/0SM CLR",
            GroupKind::Visibility,
            "1/0SM",
            GroupFault::ZeroDenominator,
        ),
    ];

    for (report, group, token, cause) in cases {
        match decoder().decode(report) {
            Err(ParseError::GroupDecode { source, report: r }) => {
                assert_eq!(group, source.group(), "{}", report);
                assert_eq!(token, source.token(), "{}", report);
                assert_eq!(cause, source.cause(), "{}", report);
                assert_eq!(report, r);
            }
            other => panic!("unexpected result for \"{}\": {:?}", report, other),
        }
    }

    assert!(matches!(
        decoder().decode(""),
        Err(ParseError::Malformed { .. })
    ));
    assert!(matches!(
        decoder().decode("1234 060250Z"),
        Err(ParseError::Malformed { .. })
    ));
}

#[test]
fn test_raw_report_verbatim() {
    let report = "  KLAX 060250Z 34010KT 10SM CLR 14/M07 A3012 $\n";
    let obs = decode(report);
    assert_eq!(report, obs.raw_report());
    assert_eq!(Some(-7.0), obs.dew_point_c());
    assert_eq!(report, obs.release());

    let report = " KLAX 060250Z 340X0KT\n";
    match decoder().decode(report) {
        Err(ParseError::GroupDecode { source, report: r }) => {
            assert_eq!("340X0KT", source.token());
            assert_eq!(report, r);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let obs = decoder()
        .decode_record("2024/03/06 02:56\n KLAX 060250Z 34010KT \r\n")
        .unwrap();
    assert_eq!(" KLAX 060250Z 34010KT ", obs.raw_report());
}

#[test]
fn test_display() {
    let obs = decode("EGBJ 200850Z 23007G17KT 4000NE RADZ BKN009 BKN015 15/14 Q1006");
    let text = obs.to_string();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        vec![
            "EGBJ, observed 2024-03-20 08:50 UTC",
            "  wind: from 230° at 7 kt, gusting to 17 kt",
            "  visibility: 4000 m",
            "  weather: rain",
            "  sky: broken clouds at 900 ft, broken clouds at 1500 ft",
            "  temperature: 15.0 °C (59.0 °F)",
            "  dew point: 14.0 °C (57.2 °F)",
            "  pressure: 29.71 inHg (1006 hPa)",
        ],
        lines
    );
}
