#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate nmea_decode;

use nmea_decode::GpsDecoder;

fuzz_target!(|data: &[u8]| {
    let mut gps = GpsDecoder::with_clock(|| 0);
    gps.decode_bytes(data);

    let stats = gps.stats();
    assert_eq!(stats.chars_processed, data.len() as u64);
    assert!(gps.decode_bytes(b"\n$GNVTG,181.50,T,,M,0.00,N,0.00,K,A*2E\r\n") == 1);
});
