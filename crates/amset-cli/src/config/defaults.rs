pub struct DefaultsConfig {
    pub mechanisms: &'static str,
    /// eV.
    pub gaussian_width: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mechanisms: "auto",
            gaussian_width: 0.01,
        }
    }
}
