//! 가짜 로그 스트림 생성기
//!
//! 뷰어를 수동으로 확인할 때 쓰는 합성 로그를 만듭니다. 먼저 과거 시각으로
//! 분포된 초기 묶음을 한 번에 쓰고, 이후 임의의 지연마다 한 줄씩 씁니다.
//! JSON 라인은 숫자 `level`, 밀리초 `time`, `pid`, `msg`, `hostname`을 가지며
//! 일부 라인은 평문입니다.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};

#[derive(Args, Debug, Clone)]
pub struct FakeStreamArgs {
    /// Initial log lines to emit immediately
    #[arg(long, default_value_t = 10_000)]
    pub initial: usize,

    /// Minimum delay between emitted logs (seconds)
    #[arg(long, default_value_t = 0.0)]
    pub min_delay: f64,

    /// Maximum delay between emitted logs (seconds)
    #[arg(long, default_value_t = 1.0)]
    pub max_delay: f64,

    #[arg(long, default_value_t = 100)]
    pub weight_trace: u32,
    #[arg(long, default_value_t = 10)]
    pub weight_debug: u32,
    #[arg(long, default_value_t = 5)]
    pub weight_info: u32,
    #[arg(long, default_value_t = 3)]
    pub weight_warn: u32,
    #[arg(long, default_value_t = 1)]
    pub weight_error: u32,
    /// Weight for plain (non-JSON) lines
    #[arg(long, default_value_t = 5)]
    pub weight_plain: u32,

    /// Minimum number of extra fields on JSON lines
    #[arg(long, default_value_t = 0)]
    pub extra_min: usize,

    /// Maximum number of extra fields on JSON lines
    #[arg(long, default_value_t = 4)]
    pub extra_max: usize,

    /// Probability of copying extra fields from sample objects
    #[arg(long, default_value_t = 0.4)]
    pub extra_sample_prob: f64,

    /// Rate (1/s) of the exponential gaps between initial lines
    #[arg(long, default_value_t = 0.01)]
    pub initial_lambda: f64,

    /// Random seed (default: random)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fallback hostname value
    #[arg(long, default_value = "zlog-fake")]
    pub hostname: String,
}

impl Default for FakeStreamArgs {
    fn default() -> Self {
        Self {
            initial: 10_000,
            min_delay: 0.0,
            max_delay: 1.0,
            weight_trace: 100,
            weight_debug: 10,
            weight_info: 5,
            weight_warn: 3,
            weight_error: 1,
            weight_plain: 5,
            extra_min: 0,
            extra_max: 4,
            extra_sample_prob: 0.4,
            initial_lambda: 0.01,
            seed: None,
            hostname: "zlog-fake".to_owned(),
        }
    }
}

impl FakeStreamArgs {
    /// 범위가 뒤집힌 값을 보정합니다.
    pub fn normalized(mut self) -> Self {
        if self.min_delay.is_nan() || self.min_delay < 0.0 {
            self.min_delay = 0.0;
        }
        if self.max_delay.is_nan() || self.max_delay < self.min_delay {
            self.max_delay = self.min_delay;
        }
        self.extra_sample_prob = if self.extra_sample_prob.is_nan() {
            0.0
        } else {
            self.extra_sample_prob.clamp(0.0, 1.0)
        };
        if self.extra_max < self.extra_min {
            self.extra_max = self.extra_min;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Plain,
}

impl Severity {
    fn level(self) -> i64 {
        match self {
            Severity::Trace => 10,
            Severity::Debug => 20,
            Severity::Info | Severity::Plain => 30,
            Severity::Warn => 40,
            Severity::Error => 50,
        }
    }
}

const MESSAGES: &[&str] = &[
    "Cache warm completed",
    "User session refreshed",
    "Background worker tick",
    "Payment intent created",
    "Email delivery queued",
    "Device heartbeat received",
    "Feature flag evaluated",
    "Rolling restart scheduled",
    "Queue depth high",
    "Index rebuilt",
];

const PLAIN_LINES: &[&str] = &[
    "starting service on port 8037",
    "connected to upstream",
    "retrying after network error",
    "healthy",
    "waiting for dependency",
    "reading configuration",
];

const CHANNELS: &[&str] = &["api", "worker", "auth", "billing", "cache", "search"];

const BASE_PATHS: &[&str] = &[
    "/api/v1/users",
    "/api/v1/search",
    "/api/v1/orders",
    "/api/v1/sessions",
    "/healthz",
];

const ACTIONS: &[&str] = &["create", "update", "list", "delete", "refresh", "reindex"];

const TERMS: &[&str] = &["/action/list", "/action/create", "/action/refresh", "/jobs/worker"];

const HOSTNAMES: &[&str] = &["zlog-alpha", "zlog-beta", "zlog-gamma", "zlog-delta"];

const RANDOM_FIELD_KEYS: &[&str] = &["requestId", "duration", "userId", "feature", "retry", "metadata"];

fn sample_objects() -> Vec<Map<String, Value>> {
    [
        json!({"feature": "fast-path", "enabled": true, "ratio": 0.15}),
        json!({"region": "us-east-1", "az": "use1-az2", "retry": 1}),
        json!({"region": "eu-west-1", "latencyMs": 128, "cached": false}),
        json!({"queue": "ingest", "depth": 120, "lagMs": 450}),
    ]
    .into_iter()
    .filter_map(|value| match value {
        Value::Object(map) => Some(map),
        _ => None,
    })
    .collect()
}

/// 결정적(시드 고정 시) 로그 라인 생성기
pub struct Generator {
    args: FakeStreamArgs,
    rng: StdRng,
    samples: Vec<Map<String, Value>>,
}

impl Generator {
    pub fn new(args: FakeStreamArgs) -> Self {
        let args = args.normalized();
        let seed = args.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            args,
            rng: StdRng::seed_from_u64(seed),
            samples: sample_objects(),
        }
    }

    /// 초기 묶음을 쓴 뒤 끝없이 한 줄씩 씁니다. 쓰기 에러에서만 반환합니다.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.write_initial(out, Utc::now().timestamp_millis())?;

        loop {
            let delay = self.next_delay();
            if delay > 0.0 {
                thread::sleep(Duration::from_secs_f64(delay));
            }
            let line = self.line_at(Utc::now().timestamp_millis());
            writeln!(out, "{line}")?;
            out.flush()?;
        }
    }

    /// `now_ms` 근처에서 끝나는 초기 라인을 씁니다.
    ///
    /// 간격은 평균 `1 / initial_lambda`초의 지수 분포를 따릅니다.
    pub fn write_initial<W: Write>(&mut self, out: &mut W, now_ms: i64) -> io::Result<()> {
        let count = self.args.initial;
        if count == 0 {
            return Ok(());
        }

        let mean_gap_ms = if self.args.initial_lambda > 0.0 {
            1000.0 / self.args.initial_lambda
        } else {
            1000.0
        };
        let mut current = now_ms as f64 - mean_gap_ms * count as f64;
        for _ in 0..count {
            current += self.exp_sample() * mean_gap_ms;
            let line = self.line_at(current as i64);
            writeln!(out, "{line}")?;
        }
        out.flush()
    }

    /// 타임스탬프가 `ts_ms`인 한 줄을 만듭니다 (줄바꿈 제외).
    pub fn line_at(&mut self, ts_ms: i64) -> String {
        let severity = self.pick_severity();
        if severity == Severity::Plain {
            return self.pick(PLAIN_LINES).to_owned();
        }

        let mut payload = Map::new();
        payload.insert("level".to_owned(), json!(severity.level()));
        payload.insert("time".to_owned(), json!(ts_ms));
        payload.insert("pid".to_owned(), json!(self.rng.random_range(1..=9000)));
        payload.insert("msg".to_owned(), json!(self.pick(MESSAGES)));

        let hostname = match HOSTNAMES.choose(&mut self.rng) {
            Some(host) => (*host).to_owned(),
            None => self.args.hostname.clone(),
        };
        payload.insert("hostname".to_owned(), json!(hostname));

        for (key, pool, prob) in [
            ("channel", CHANNELS, 0.5),
            ("basePath", BASE_PATHS, 0.4),
            ("action", ACTIONS, 0.4),
            ("term", TERMS, 0.4),
        ] {
            let value = self.pick(pool);
            if self.rng.random_bool(prob) {
                payload.insert(key.to_owned(), json!(value));
            }
        }

        self.add_extra_fields(&mut payload);
        Value::Object(payload).to_string()
    }

    fn next_delay(&mut self) -> f64 {
        let (min, max) = (self.args.min_delay, self.args.max_delay);
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// 평균 1의 지수 분포 표본
    fn exp_sample(&mut self) -> f64 {
        let u: f64 = self.rng.random();
        -(1.0 - u).ln()
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        pool.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn pick_severity(&mut self) -> Severity {
        let weighted = [
            (Severity::Trace, self.args.weight_trace),
            (Severity::Debug, self.args.weight_debug),
            (Severity::Info, self.args.weight_info),
            (Severity::Warn, self.args.weight_warn),
            (Severity::Error, self.args.weight_error),
            (Severity::Plain, self.args.weight_plain),
        ];
        let total: u64 = weighted.iter().map(|(_, w)| u64::from(*w)).sum();
        if total == 0 {
            return Severity::Info;
        }

        let mut target = self.rng.random_range(0..total);
        for (severity, weight) in weighted {
            let weight = u64::from(weight);
            if target < weight {
                return severity;
            }
            target -= weight;
        }
        Severity::Plain
    }

    fn add_extra_fields(&mut self, payload: &mut Map<String, Value>) {
        let (min, max) = (self.args.extra_min, self.args.extra_max);
        let mut remaining = if max > min {
            self.rng.random_range(min..=max)
        } else {
            min
        };
        if remaining == 0 {
            return;
        }

        if !self.samples.is_empty() && self.rng.random_bool(self.args.extra_sample_prob) {
            let index = self.rng.random_range(0..self.samples.len());
            let sample = &self.samples[index];
            let mut keys: Vec<&String> = sample
                .keys()
                .filter(|key| !matches!(key.as_str(), "level" | "time" | "msg"))
                .collect();
            keys.shuffle(&mut self.rng);
            for key in keys.into_iter().take(remaining) {
                payload.insert(key.clone(), sample[key.as_str()].clone());
                remaining -= 1;
            }
        }

        while remaining > 0 {
            if RANDOM_FIELD_KEYS.iter().all(|key| payload.contains_key(*key)) {
                break;
            }
            let (key, value) = self.random_field();
            if payload.contains_key(key) {
                continue;
            }
            payload.insert(key.to_owned(), value);
            remaining -= 1;
        }
    }

    fn random_field(&mut self) -> (&'static str, Value) {
        let rng = &mut self.rng;
        match rng.random_range(0..6) {
            0 => ("requestId", json!(random_hex(rng, 12))),
            1 => ("duration", json!(rng.random_range(0..5000))),
            2 => ("userId", json!(rng.random_range(0..9999))),
            3 => ("feature", json!(format!("feature_{}", rng.random_range(0..20)))),
            4 => ("retry", json!(rng.random_range(0..3))),
            _ => (
                "metadata",
                json!({
                    "attempt": rng.random_range(0..5),
                    "region": format!("us-{}", rng.random_range(1..=3)),
                }),
            ),
        }
    }
}

fn random_hex(rng: &mut StdRng, len: usize) -> String {
    const CHARS: &[u8] = b"abcdef0123456789";
    (0..len)
        .map(|_| char::from(CHARS[rng.random_range(0..CHARS.len())]))
        .collect()
}
