/// Fixed option lists offered by the punishment forms

pub const SERVERS: [&str; 4] = [
    "Servidor 1",
    "Servidor 2",
    "Servidor RP Principal",
    "Servidor de Testes",
];

/// Server preselected for new punishments
pub const DEFAULT_SERVER: &str = SERVERS[2];

/// Severity labels for organization warnings, mildest first
pub const ORG_WARN_LEVELS: [&str; 5] = [
    "Advertência Leve",
    "Advertência Média",
    "Advertência Grave",
    "Último Aviso",
    "Advertência Administrativa",
];

/// Suggested reasons grouped by category; free text is also accepted
pub const PREDEFINED_REASONS: [(&str, &[&str]); 5] = [
    ("ADMINISTRATIVO", &["Quebra de regras", "Desobediência"]),
    ("TRAPACAS", &["Uso de hack", "Abuso de bug"]),
    ("ROLEPLAY", &["Anti-RP", "RDM", "VDM"]),
    ("COMPORTAMENTO", &["Ofensa", "Toxicidade"]),
    ("ORGANIZACAO", &["Invasão de base", "Falta de membros"]),
];

pub fn is_org_warn_level(label: &str) -> bool {
    ORG_WARN_LEVELS.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server() {
        assert_eq!(DEFAULT_SERVER, "Servidor RP Principal");
        assert!(is_org_warn_level("Último Aviso"));
        assert!(!is_org_warn_level("Leve"));
    }
}
