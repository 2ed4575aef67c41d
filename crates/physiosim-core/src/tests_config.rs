#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::config::AppConfig;
    use crate::error::PhysioError;
    use crate::solver::SolverOptions;

    #[test]
    fn defaults_when_empty() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8000");
        assert_eq!(cfg.solver, SolverOptions::default());
        #[cfg(feature = "legacy")]
        assert_eq!(cfg.legacy.default_samples, 10);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg = AppConfig::from_toml_str("[server]\nport = 9100\n\n[solver]\nrtol = 1e-10\n").unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.solver.rtol, 1e-10);
        assert_eq!(cfg.solver.atol, SolverOptions::default().atol);
    }

    #[test]
    fn invalid_tolerance_rejected() {
        let err = AppConfig::from_toml_str("[solver]\natol = -1.0\n").unwrap_err();
        assert!(matches!(err, PhysioError::InvalidConfig(_)));
    }

    #[cfg(feature = "legacy")]
    #[test]
    fn legacy_default_above_cap_rejected() {
        let err = AppConfig::from_toml_str("[legacy]\ndefault_samples = 20\nmax_samples = 5\n").unwrap_err();
        assert!(matches!(err, PhysioError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(matches!(AppConfig::from_toml_str("[server"), Err(PhysioError::ConfigToml(_))));
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(f, "[legacy]\nmax_samples = 50\n\n[server]\nhost = \"0.0.0.0\"").unwrap();
        let cfg = AppConfig::load(Some(f.path())).unwrap();
        #[cfg(feature = "legacy")]
        {
            assert_eq!(cfg.legacy.max_samples, 50);
            assert_eq!(cfg.legacy.default_samples, 10);
        }
        assert_eq!(cfg.server.host, "0.0.0.0");
    }

    // The only test that sets PHYSIOSIM__* variables, and no other test reads
    // server.port or solver.rtol through `load`.
    #[test]
    fn environment_overrides_file() {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(f, "[server]\nport = 8100\n\n[solver]\nrtol = 1e-6\natol = 1e-7").unwrap();
        std::env::set_var("PHYSIOSIM__SERVER__PORT", "9321");
        std::env::set_var("PHYSIOSIM__SOLVER__RTOL", "1e-9");
        let loaded = AppConfig::load(Some(f.path()));
        std::env::remove_var("PHYSIOSIM__SERVER__PORT");
        std::env::remove_var("PHYSIOSIM__SOLVER__RTOL");

        let cfg = loaded.unwrap();
        assert_eq!(cfg.server.port, 9321);
        assert_eq!(cfg.solver.rtol, 1e-9);
        assert_eq!(cfg.solver.atol, 1e-7);
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, PhysioError::Config(_)));
    }
}
