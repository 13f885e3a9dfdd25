#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::{Precision, RunConfig, Topology};
    use crate::pipeline::run;
    use crate::Error;

    fn write_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "evalnet_pipeline_{}_{}.csv",
            std::process::id(),
            name
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn synthetic_csv(n: usize) -> String {
        (0..n)
            .map(|i| {
                let label = -1.0 + 2.0 * i as f64 / (n - 1) as f64;
                format!("{},{},{},{}\n", label, i, i * 2, i * 3)
            })
            .collect()
    }

    fn config(path: PathBuf) -> RunConfig {
        let mut config = RunConfig::new(path);
        config.topology = Topology::B;
        config.epochs = 1;
        config.batch_size = 4;
        config.init_seed = Some(3);
        config
    }

    #[test]
    fn reports_mse_then_one_line_per_test_sample() {
        let path = write_csv("report", &synthetic_csv(10));
        let mut out = Vec::new();
        let mse = run(&config(path), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();

        /* 10 rows at 0.2 -> 2 test samples */
        assert_eq!(lines.len(), 3);
        let reported = lines[0].strip_prefix("Test MSE: ").unwrap();
        assert_eq!(reported.parse::<f64>().unwrap(), mse);
        for (i, line) in lines[1..].iter().enumerate() {
            let prefix = format!("Sample {}: True Label = ", i + 1);
            let rest = line.strip_prefix(&prefix).unwrap();
            let (label, prediction) = rest.split_once(", Prediction = ").unwrap();
            assert!(label.parse::<f64>().unwrap().is_finite());
            assert!(prediction.parse::<f64>().unwrap().is_finite());
        }
    }

    #[test]
    fn max_report_rows_caps_sample_lines() {
        let path = write_csv("capped", &synthetic_csv(10));
        let mut config = config(path);
        config.max_report_rows = Some(1);

        let mut out = Vec::new();
        run(&config, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn runs_at_f32_precision() {
        let path = write_csv("f32", &synthetic_csv(10));
        let mut config = config(path);
        config.precision = Precision::F32;

        let mut out = Vec::new();
        let mse = run(&config, &mut out).unwrap();
        assert!(mse.is_finite());
        assert!(mse >= 0.0);
    }

    #[test]
    fn parse_error_aborts_before_training() {
        let path = write_csv("bad", "1,2,3\n4,nope,6\n");
        let mut out = Vec::new();
        match run(&config(path), &mut out) {
            Err(Error::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_fraction_is_rejected_before_load() {
        /* the input path does not exist; validation must fail first */
        let mut config = config(PathBuf::from("/nonexistent/evalnet.csv"));
        config.test_fraction = 1.5;

        let mut out = Vec::new();
        assert!(matches!(
            run(&config, &mut out),
            Err(Error::Config(_))
        ));
    }
}
