#![allow(dead_code)]

use ndarray::Array2;
use simulac_data::{parse_setup, SetConfig};
use simulac_phage::PhageConfig;

/// Column layout shared by the synthetic runs:
/// 0 time, 1 volume, 2 CI2, 3 Cro2, 4 CII, 5 CIII, 6 N,
/// 7..9 PRE operator states, 9..11 PRE launch counts.
pub const SETUP: &str = "\
time_index = 0;
volume_index = 1;
species_CICI_index = 2;
species_CroCro_index = 3;
species_CII_index = 4;
species_CIII_index = 5;
species_N_index = 6;
operator_OperatorPRE_0_index = 7;
operator_OperatorPRE_1_index = 8;
operator_OperatorPL_0_index = 5;
promoter_PRE_index = 9;
promoter_PRE_1_index = 10;
";

pub const VARS: usize = 11;

pub fn set_config(path: &str) -> SetConfig {
    let setup = parse_setup(SETUP);
    SetConfig::from_entries(path, "lambda_setup.py", &setup.entries).expect("set config")
}

/// `Lambda` set with an MOI of two.
pub fn phage_config() -> PhageConfig {
    PhageConfig::from_set(&set_config("/sims/Lambda_0511/lambda-0511_1200")).expect("phage config")
}

/// Run sampled every 10 s for `steps` rows. PRE launches `rate` times per
/// row on each copy from `on` seconds onwards.
pub fn run(steps: usize, on: f64, rate: f64, ci2: f64, cro2: f64) -> Array2<f64> {
    let mut data = Array2::<f64>::zeros((steps, VARS));
    let mut launched = 0.0;
    for t in 0..steps {
        let time = t as f64 * 10.0;
        if time >= on {
            launched += rate;
        }
        data[[t, 0]] = time;
        data[[t, 1]] = 1.0;
        data[[t, 2]] = ci2;
        data[[t, 3]] = cro2;
        data[[t, 9]] = launched;
        data[[t, 10]] = launched;
        if time >= on {
            data[[t, 7]] = 3.0;
            data[[t, 8]] = 3.0;
        }
    }
    data
}

/// Run sampled every 10 s where both PRE copies launch once per row inside
/// each of `spans` (row ranges) and the operators sit open meanwhile.
pub fn bursts(steps: usize, spans: &[std::ops::Range<usize>]) -> Array2<f64> {
    let mut data = Array2::<f64>::zeros((steps, VARS));
    let mut launched = 0.0;
    for t in 0..steps {
        let on = spans.iter().any(|span| span.contains(&t));
        if on {
            launched += 1.0;
            data[[t, 7]] = 3.0;
            data[[t, 8]] = 3.0;
        }
        data[[t, 0]] = t as f64 * 10.0;
        data[[t, 1]] = 1.0;
        data[[t, 2]] = 9.0;
        data[[t, 3]] = 1.0;
        data[[t, 9]] = launched;
        data[[t, 10]] = launched;
    }
    data
}
