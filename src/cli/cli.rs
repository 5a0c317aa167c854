use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, help = "Catalog file (.json or .csv); defaults to the built-in landmarks")]
    catalog: Option<String>,

    #[arg(long, help = "Current latitude for a one-shot ranking")]
    lat: Option<f64>,

    #[arg(long, help = "Current longitude for a one-shot ranking")]
    lon: Option<f64>,

    #[arg(short, long, default_value_t = 50.0)]
    radius: f64,

    #[arg(short, long, default_value_t = 10)]
    limit: usize,

    #[arg(short, long, default_value_t = false, help = "Run a random-walk collection simulation")]
    walk: bool,

    #[arg(short, long, default_value_t = 200)]
    steps: usize,

    #[arg(long, help = "Random seed for a deterministic walk")]
    seed: Option<u64>,

    #[arg(long, default_value = "checkpoints")]
    checkpoint_dir: String,

    #[arg(long, default_value_t = false, help = "Ignore any existing session checkpoint")]
    no_continue: bool,

    #[arg(long, default_value_t = false, help = "Export collection events to CSV")]
    export_csv: bool,

    #[arg(short, long, default_value = "output")]
    output_dir: String,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,
}

// Add getter methods for all fields
impl Args {
    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn lat(&self) -> Option<f64> {
        self.lat
    }

    pub fn lon(&self) -> Option<f64> {
        self.lon
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn walk(&self) -> bool {
        self.walk
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn checkpoint_dir(&self) -> &str {
        &self.checkpoint_dir
    }

    pub fn no_continue(&self) -> bool {
        self.no_continue
    }

    pub fn export_csv(&self) -> bool {
        self.export_csv
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }
}
