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

    fn pick<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[(self.next_u64() % choices.len() as u64) as usize]
    }
}

const HEADER: [&str; 7] = [
    "Location",
    "Latitude",
    "Longitude",
    "Opening hours",
    "Accessible",
    "Baby change",
    "Charge amount",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    // Town centres around Calderdale: (name, lat, lon)
    let towns = [
        ("Halifax", 53.7248, -1.8658),
        ("Hebden Bridge", 53.7418, -2.0140),
        ("Todmorden", 53.7137, -2.0990),
        ("Brighouse", 53.7030, -1.7840),
        ("Sowerby Bridge", 53.7087, -1.9076),
    ];
    let sites = ["Bus Station", "Market", "Park", "Library", "Car Park"];
    let hours = ["24 hours", "08:00-18:00", "09:00-17:00", "07:00-20:00", ""];
    let yes_no = ["Yes", "No", "yes", "NO"];
    let charges = ["Free", "20p", "40p", ""];

    let mut rows: Vec<Vec<String>> = vec![HEADER.iter().map(|h| h.to_string()).collect()];

    for (town, lat, lon) in &towns {
        for site in &sites {
            // Scatter within roughly 1 km of the town centre
            let jitter_lat = (rng.next_f64() - 0.5) * 0.018;
            let jitter_lon = (rng.next_f64() - 0.5) * 0.030;

            rows.push(vec![
                format!("{town} {site}"),
                format!("{:.6}", lat + jitter_lat),
                format!("{:.6}", lon + jitter_lon),
                rng.pick(&hours).to_string(),
                rng.pick(&yes_no).to_string(),
                rng.pick(&yes_no).to_string(),
                rng.pick(&charges).to_string(),
            ]);
        }
    }

    // Rows the loader is expected to skip
    rows.push(vec![String::new(); HEADER.len()]);
    rows.push(vec![
        "Unknown Kiosk".to_string(),
        "n/a".to_string(),
        "-1.87".to_string(),
        String::new(),
        "No".to_string(),
        "No".to_string(),
        String::new(),
    ]);

    let json_path = "sample_toilets.json";
    let json = serde_json::to_string_pretty(&rows).expect("Failed to serialize table");
    std::fs::write(json_path, json).expect("Failed to write JSON file");

    let csv_path = "sample_toilets.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    for row in &rows {
        writer.write_record(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    println!(
        "Wrote {} facilities (+2 invalid rows) to {json_path} and {csv_path}",
        towns.len() * sites.len()
    );
}
