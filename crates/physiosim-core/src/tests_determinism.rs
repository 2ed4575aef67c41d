#[cfg(test)]
mod tests {
    use std::thread;

    use crate::narrator::explain;
    use crate::scenario::ScenarioId;
    use crate::simulate::{simulate, Integrator};
    use crate::solver::SolverOptions;

    #[test]
    fn repeated_runs_are_bit_identical() {
        let a = simulate(ScenarioId::Hypertension).unwrap();
        let b = simulate(ScenarioId::Hypertension).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
        assert_eq!(
            explain(ScenarioId::Hypertension, &a).unwrap(),
            explain(ScenarioId::Hypertension, &b).unwrap()
        );
    }

    #[test]
    fn digest_separates_scenarios() {
        let digests: Vec<[u8; 32]> = ScenarioId::ALL
            .iter()
            .map(|&s| simulate(s).unwrap().digest())
            .collect();
        for i in 0..digests.len() {
            for j in i + 1..digests.len() {
                assert_ne!(digests[i], digests[j]);
            }
        }
    }

    #[test]
    fn concurrent_callers_agree() {
        let expected = simulate(ScenarioId::Hemorrhage).unwrap().digest();
        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(|| simulate(ScenarioId::Hemorrhage).unwrap().digest()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }

    #[test]
    fn tighter_tolerance_stays_close() {
        let coarse = simulate(ScenarioId::Stroke).unwrap();
        let fine = Integrator::new(SolverOptions { rtol: 1e-12, atol: 1e-12, ..SolverOptions::default() })
            .simulate(ScenarioId::Stroke)
            .unwrap();
        for (a, b) in coarse.blood_pressure.iter().zip(&fine.blood_pressure) {
            assert!((a - b).abs() < 1e-5);
        }
    }
}
