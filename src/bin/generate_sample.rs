use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const CLUBS: [(i64, &str); 20] = [
    (418, "Real Madrid"),
    (131, "FC Barcelona"),
    (13, "Atlético de Madrid"),
    (621, "Athletic Club"),
    (1050, "Villarreal CF"),
    (150, "Real Betis Balompié"),
    (368, "Sevilla FC"),
    (681, "Real Sociedad"),
    (1049, "Valencia CF"),
    (940, "Celta de Vigo"),
    (331, "CA Osasuna"),
    (3709, "Getafe CF"),
    (367, "Rayo Vallecano"),
    (237, "RCD Mallorca"),
    (1533, "Deportivo Alavés"),
    (12321, "Girona FC"),
    (714, "RCD Espanyol Barcelona"),
    (3368, "Levante UD"),
    (1108, "Elche CF"),
    (2497, "Real Oviedo"),
];

const MATCHDAYS: i32 = 4;
const PLAYED_MATCHDAYS: i32 = 3;
const KICKOFFS: [&str; 5] = ["14:00", "16:15", "18:30", "19:00", "21:00"];

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

struct Fixture {
    match_id: i64,
    matchday: i32,
    home: usize,
    away: usize,
    date: Option<String>,
    kickoff: String,
    result: Option<String>,
}

/// Round-robin pairings (circle method): club 0 stays, the rest rotate.
fn schedule(rng: &mut SimpleRng) -> Vec<Fixture> {
    let n = CLUBS.len();
    let mut fixtures = Vec::new();
    for md in 1..=MATCHDAYS {
        let r = (md - 1) as usize;
        let rotation: Vec<usize> = std::iter::once(0)
            .chain((0..n - 1).map(|i| 1 + (i + r) % (n - 1)))
            .collect();
        for i in 0..n / 2 {
            let (a, b) = (rotation[i], rotation[n - 1 - i]);
            let (home, away) = if (i + r) % 2 == 0 { (a, b) } else { (b, a) };
            let match_id = 4_600_000 + fixtures.len() as i64;
            // Matchday weekends start on Friday 2025-08-15.
            let day = 15 + (md - 1) * 7 + (i as i32 % 3);
            let date = if md == MATCHDAYS && i == 0 {
                Some("TBD".to_string())
            } else if day <= 31 {
                Some(format!("2025-08-{day:02}"))
            } else {
                Some(format!("2025-09-{:02}", day - 31))
            };
            let result = (md <= PLAYED_MATCHDAYS)
                .then(|| format!("{}:{}", rng.below(4), rng.below(3)));
            fixtures.push(Fixture {
                match_id,
                matchday: md,
                home,
                away,
                date,
                kickoff: KICKOFFS[rng.below(KICKOFFS.len() as u64) as usize].to_string(),
                result,
            });
        }
    }
    fixtures
}

fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) -> Result<()> {
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn strings<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ArrayRef {
    Arc::new(StringArray::from_iter(values))
}

fn write_overview(dir: &Path, fixtures: &[Fixture]) -> Result<PathBuf> {
    let path = dir.join("matchday_overview_gold.parquet");
    let club = |i: usize| CLUBS[i];
    write_parquet(
        &path,
        vec![
            (
                "match_id",
                Arc::new(Int64Array::from_iter_values(fixtures.iter().map(|f| f.match_id))),
            ),
            (
                "matchday",
                Arc::new(Int32Array::from_iter_values(fixtures.iter().map(|f| f.matchday))),
            ),
            // ids stored as floats, as pandas does for nullable integer columns
            (
                "home_club_id",
                Arc::new(Float64Array::from_iter_values(
                    fixtures.iter().map(|f| club(f.home).0 as f64),
                )),
            ),
            (
                "away_club_id",
                Arc::new(Float64Array::from_iter_values(
                    fixtures.iter().map(|f| club(f.away).0 as f64),
                )),
            ),
            ("home_club_name", strings(fixtures.iter().map(|f| Some(club(f.home).1)))),
            ("away_club_name", strings(fixtures.iter().map(|f| Some(club(f.away).1)))),
            ("match_date", strings(fixtures.iter().map(|f| f.date.as_deref()))),
            ("kickoff_time", strings(fixtures.iter().map(|f| Some(f.kickoff.as_str())))),
            ("result_string", strings(fixtures.iter().map(|f| f.result.as_deref()))),
            ("season", strings(fixtures.iter().map(|_| Some("2025-26")))),
            ("competition", strings(fixtures.iter().map(|_| Some("LaLiga")))),
        ],
    )?;
    Ok(path)
}

#[derive(Default)]
struct KpiColumns {
    match_id: Vec<i64>,
    club_side: Vec<&'static str>,
    club_id: Vec<i64>,
    club_name: Vec<&'static str>,
    players_total_squad: Vec<i64>,
    players_available: Vec<i64>,
    players_used: Vec<Option<i64>>,
    usage_rate: Vec<Option<f64>>,
    pct_available: Vec<f64>,
    pct_matchday: Vec<f64>,
    pct_deployed: Vec<Option<f64>>,
    avg_age_used: Vec<Option<f64>>,
    weighted_age_used: Vec<Option<f64>>,
    avg_market_value_used: Vec<Option<f64>>,
    weighted_market_value_used: Vec<Option<f64>>,
    deployed_squad_market_value: Vec<Option<f64>>,
}

fn write_kpis(dir: &Path, fixtures: &[Fixture], rng: &mut SimpleRng) -> Result<PathBuf> {
    let mut k = KpiColumns::default();
    for f in fixtures {
        let played = f.result.is_some();
        for (side, club) in [("home", f.home), ("away", f.away)] {
            let squad = 23 + rng.below(5) as i64;
            let available = squad - rng.below(5) as i64;
            let in_matchday = available.min(23);
            let used = 13 + rng.below(4) as i64;
            let avg_age = rng.range(24.0, 29.5);
            let avg_value = rng.range(2.0e6, 60.0e6);

            k.match_id.push(f.match_id);
            k.club_side.push(side);
            k.club_id.push(CLUBS[club].0);
            k.club_name.push(CLUBS[club].1);
            k.players_total_squad.push(squad);
            k.players_available.push(available);
            k.pct_available.push(available as f64 / squad as f64);
            k.pct_matchday.push(in_matchday as f64 / squad as f64);
            k.players_used.push(played.then_some(used));
            k.usage_rate.push(played.then(|| used as f64 / available as f64));
            k.pct_deployed.push(played.then(|| used as f64 / squad as f64));
            k.avg_age_used.push(played.then_some(avg_age));
            k.weighted_age_used
                .push(played.then(|| avg_age + rng.range(-0.8, 0.8)));
            k.avg_market_value_used.push(played.then_some(avg_value));
            k.weighted_market_value_used
                .push(played.then(|| avg_value * rng.range(0.9, 1.2)));
            k.deployed_squad_market_value
                .push(played.then(|| avg_value * used as f64));
        }
    }

    let path = dir.join("club_match_kpis_gold.parquet");
    let floats = |v: Vec<Option<f64>>| -> ArrayRef { Arc::new(Float64Array::from(v)) };
    write_parquet(
        &path,
        vec![
            ("match_id", Arc::new(Int64Array::from(k.match_id))),
            ("club_side", strings(k.club_side.into_iter().map(Some))),
            ("club_id", Arc::new(Int64Array::from(k.club_id))),
            ("club_name", strings(k.club_name.into_iter().map(Some))),
            ("players_total_squad", Arc::new(Int64Array::from(k.players_total_squad))),
            ("players_available", Arc::new(Int64Array::from(k.players_available))),
            ("players_used", Arc::new(Int64Array::from(k.players_used))),
            ("usage_rate", floats(k.usage_rate)),
            ("pct_available", Arc::new(Float64Array::from(k.pct_available))),
            ("pct_matchday", Arc::new(Float64Array::from(k.pct_matchday))),
            ("pct_deployed", floats(k.pct_deployed)),
            ("avg_age_used", floats(k.avg_age_used)),
            ("weighted_age_used", floats(k.weighted_age_used)),
            ("avg_market_value_used", floats(k.avg_market_value_used)),
            ("weighted_market_value_used", floats(k.weighted_market_value_used)),
            ("deployed_squad_market_value", floats(k.deployed_squad_market_value)),
        ],
    )?;
    Ok(path)
}

#[derive(Serialize)]
struct ClubRow {
    club_id: i64,
    club_name: &'static str,
}

fn write_clubs(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("clubs_silver.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    for (club_id, club_name) in CLUBS {
        writer.serialize(ClubRow { club_id, club_name })?;
    }
    writer.flush()?;
    Ok(path)
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data").join("processed"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let fixtures = schedule(&mut rng);

    let written = [
        write_overview(&out_dir, &fixtures)?,
        write_kpis(&out_dir, &fixtures, &mut rng)?,
        write_clubs(&out_dir)?,
    ];
    for path in &written {
        println!("Wrote {}", path.display());
    }
    println!(
        "{} matches over {MATCHDAYS} matchdays for {} clubs",
        fixtures.len(),
        CLUBS.len()
    );
    Ok(())
}
