pub type ContainmentId = u64;

/// Which scope's bindings are authoritative for a containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionsSource {
    #[default]
    Global,
    Activity,
    Local,
}

impl ActionsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionsSource::Global => "global",
            ActionsSource::Activity => "activity",
            ActionsSource::Local => "local",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "global" => Some(ActionsSource::Global),
            "activity" => Some(ActionsSource::Activity),
            "local" => Some(ActionsSource::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainmentKind {
    #[default]
    Desktop,
    Panel,
}

impl ContainmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainmentKind::Desktop => "desktop",
            ContainmentKind::Panel => "panel",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "desktop" => Some(ContainmentKind::Desktop),
            "panel" => Some(ContainmentKind::Panel),
            _ => None,
        }
    }
}

/// Descriptor for a shell surface (desktop or panel) that receives input
/// events. The registry resolves events against the containment's `source`
/// scope; the shell owns the surface itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Containment {
    pub id: ContainmentId,
    pub activity: String,
    pub kind: ContainmentKind,
    pub source: ActionsSource,
}

impl Containment {
    pub fn new(id: ContainmentId, activity: impl Into<String>, kind: ContainmentKind) -> Self {
        Self {
            id,
            activity: activity.into(),
            kind,
            source: ActionsSource::default(),
        }
    }

    pub fn with_source(mut self, source: ActionsSource) -> Self {
        self.source = source;
        self
    }

    pub fn is_panel(&self) -> bool {
        self.kind == ContainmentKind::Panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_defaults_to_global() {
        let containment = Containment::new(1, "main", ContainmentKind::Desktop);
        assert_eq!(containment.source, ActionsSource::Global);
        assert!(!containment.is_panel());
    }

    #[test]
    fn test_enum_string_round_trip() {
        for source in [
            ActionsSource::Global,
            ActionsSource::Activity,
            ActionsSource::Local,
        ] {
            assert_eq!(ActionsSource::parse(source.as_str()), Some(source));
        }
        for kind in [ContainmentKind::Desktop, ContainmentKind::Panel] {
            assert_eq!(ContainmentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ActionsSource::parse("floating"), None);
    }
}
