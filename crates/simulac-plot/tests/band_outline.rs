use plotters::prelude::*;
use simulac_core::SimulacError;
use simulac_plot::{band_polygon, draw_shaded_band};

#[test]
fn outline_runs_upper_forward_then_lower_back() {
    let outline = band_polygon(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).expect("outline");
    assert_eq!(
        outline,
        vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (2.0, 2.0), (1.0, 1.0), (0.0, 0.0)]
    );
}

#[test]
fn mismatched_lengths_are_rejected() {
    let err = band_polygon(&[0.0, 1.0], &[0.0], &[1.0, 2.0]).expect_err("mismatch");
    assert!(matches!(err, SimulacError::Plot(_)));
    assert_eq!(err.code(), "band_length_mismatch");
    assert!(band_polygon(&[0.0], &[0.0, 1.0], &[1.0, 2.0]).is_err());
}

#[test]
fn shaded_band_draws_a_translucent_polygon() {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (200, 100)).into_drawing_area();
        root.fill(&WHITE).expect("fill");
        let mut chart = ChartBuilder::on(&root)
            .build_cartesian_2d(0.0..2.0, 0.0..4.0)
            .expect("chart");
        draw_shaded_band(&mut chart, &[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], &BLUE, 0.25)
            .expect("band");
        let err = draw_shaded_band(&mut chart, &[0.0], &[0.0, 1.0], &[1.0], &RED, 0.25)
            .expect_err("mismatch");
        assert_eq!(err.code(), "band_length_mismatch");
        root.present().expect("present");
    }
    assert_eq!(svg.matches("<polygon").count(), 1);
    assert!(svg.contains("opacity=\"0.25\""));
}
