//! Writes `sample_wardrive.csv`, a small WiGLE-style scan log for trying
//! out the viewer without capture hardware.

const HEADER: [&str; 11] = [
    "MAC",
    "SSID",
    "AuthMode",
    "FirstSeen",
    "Channel",
    "RSSI",
    "CurrentLatitude",
    "CurrentLongitude",
    "AltitudeMeters",
    "AccuracyMeters",
    "Type",
];

const WIFI_AUTH_MODES: [&str; 6] = [
    "[OPEN]",
    "[OPEN]",
    "WPA2",
    "[WPA2-PSK-CCMP][ESS]",
    "[WPA-PSK-TKIP][ESS]",
    "WEP",
];

const SSIDS: [&str; 8] = [
    "CafeGuest",
    "Livebox-3F2A",
    "eduroam",
    "HomeNet",
    "AndroidAP",
    "FreeWifi",
    "",
    "Printer_5C",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn mac(&mut self) -> String {
        let bytes: Vec<String> = (0..6)
            .map(|_| format!("{:02x}", self.next_u64() as u8))
            .collect();
        bytes.join(":")
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Walk around a fixed starting point, roughly 1 m per step.
    let (mut lat, mut lon) = (48.8566_f64, 2.3522_f64);

    let output_path = "sample_wardrive.csv";
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output_path)
        .expect("Failed to create output file");

    writer
        .write_record([
            "WigleWifi-1.4",
            "appRelease=sample",
            "model=generate_sample",
            "release=1",
            "device=none",
            "display=none",
            "board=none",
            "brand=none",
        ])
        .expect("Failed to write title line");
    writer.write_record(HEADER).expect("Failed to write header");

    let mut rows = 0;
    for i in 0..200 {
        lat += (rng.next_f64() - 0.5) * 2e-5;
        lon += (rng.next_f64() - 0.5) * 2e-5;

        let is_ble = rng.below(4) == 0;
        let rssi = -30 - rng.below(75) as i64;
        let minute = i / 10;
        let second = (i % 10) * 6;
        let first_seen = format!("2024-05-01 10:{minute:02}:{second:02}");

        // Every 25th sighting has no GPS fix yet.
        let (lat_s, lon_s) = if i % 25 == 0 {
            (String::new(), String::new())
        } else {
            (format!("{lat:.7}"), format!("{lon:.7}"))
        };

        let (ssid, auth, channel, kind) = if is_ble {
            ("", "Misc [LE]", "0".to_string(), "BLE")
        } else {
            (
                SSIDS[rng.below(SSIDS.len())],
                WIFI_AUTH_MODES[rng.below(WIFI_AUTH_MODES.len())],
                (1 + rng.below(11)).to_string(),
                "WIFI",
            )
        };

        let mac = rng.mac();
        let rssi = rssi.to_string();
        writer
            .write_record([
                mac.as_str(),
                ssid,
                auth,
                first_seen.as_str(),
                channel.as_str(),
                rssi.as_str(),
                lat_s.as_str(),
                lon_s.as_str(),
                "35",
                "5",
                kind,
            ])
            .expect("Failed to write row");
        rows += 1;

        // A few truncated rows, as written by interrupted captures.
        if i % 60 == 59 {
            writer
                .write_record([rng.mac().as_str(), "Truncated", "[OPEN]"])
                .expect("Failed to write row");
        }
    }

    writer.flush().expect("Failed to flush output");

    println!("Wrote {rows} sightings (plus malformed rows) to {output_path}");
}
