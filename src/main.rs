//! Reads NMEA sentences from stdin and prints what was decoded.
//!
//! `RUST_LOG=debug` shows every routed and rejected frame.

extern crate env_logger;
#[macro_use]
extern crate log;
extern crate nmea_decode;

use env_logger::{Builder, Target};
use nmea_decode::geo::cardinal;
use nmea_decode::model::SatelliteSystem;
use nmea_decode::units::{knots_to_kmph, meters_to_feet};
use nmea_decode::GpsDecoder;

use std::io;
use std::process;

fn print_system(name: &str, system: &SatelliteSystem) {
    println!("{}:", name);
    println!(" satellites in view: {}", system.satellites_in_view_count.value());
    let active: Vec<String> = system.active_ids().map(|id| id.to_string()).collect();
    println!(" active satellite ids: {}", active.join(","));
    println!(" satellites in view:");
    for sat in system.satellites_in_view.iter().filter(|s| s.id.value() != 0) {
        println!(
            "   id: {:2}  elevation: {:3} deg  azimuth: {:3} deg  snr: {:3} dBHz",
            sat.id.value(),
            sat.elevation.value(),
            sat.azimuth.value(),
            sat.snr.value()
        );
    }
}

fn main() {
    Builder::from_default_env()
        .target(Target::Stderr)
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let mut gps = GpsDecoder::new();
    let stdin = io::stdin();
    let decoded = match gps.decode_reader(stdin.lock()) {
        Ok(n) => n,
        Err(e) => {
            error!("failed to read input: {}", e);
            process::exit(1);
        }
    };

    let stats = gps.stats();
    info!(
        "{} sentences decoded, {} chars, {} passed / {} failed checksum",
        decoded, stats.chars_processed, stats.passed_checksum, stats.failed_checksum
    );

    let location = gps.location();
    if location.is_valid() {
        println!("location: lat: {:.6}, lng: {:.6}", location.lat(), location.lng());
    } else {
        println!("location: no fix");
    }
    println!(
        "hdop: {}, vdop: {}, pdop: {}",
        gps.hdop().value(),
        gps.vdop().value(),
        gps.pdop().value()
    );
    println!("fix type: {}", gps.fix_type().value());

    match (gps.date().to_naive_date(), gps.time().to_naive_time()) {
        (Some(date), Some(time)) => println!("date: {} {}", date, time),
        _ => println!("date: unknown"),
    }

    let course = gps.course().value();
    println!(
        "speed: {:.2} km/h, course: {:.2} deg ({}), altitude: {} m ({:.0} ft)",
        knots_to_kmph(gps.speed().value()),
        course,
        cardinal(course),
        gps.altitude().value(),
        meters_to_feet(gps.altitude().value())
    );

    let satellites = gps.satellites();
    print_system("BeiDou", &satellites.beidou);
    print_system("GPS", &satellites.gps);
    print_system("GLONASS", &satellites.glonass);
}
