pub struct DefaultsConfig {
    pub groups: String,
    pub assignment: String,
    pub max_exact_size: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            groups: "all".to_string(),
            assignment: "hungarian".to_string(),
            max_exact_size: 64,
        }
    }
}
