use testproc::domain::{Priority, Project, Requirement, Signal, SignalId, SignalType};

/// Builds valid projects with minimal ceremony
pub struct ProjectBuilder {
    project_id: String,
    system: String,
    signals: Vec<Signal>,
    requirements: Vec<Requirement>,
}

impl ProjectBuilder {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            system: "Test System".to_string(),
            signals: Vec::new(),
            requirements: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: &str) -> Self {
        self.system = system.to_string();
        self
    }

    pub fn with_signal(mut self, id: &str, signal_type: SignalType) -> Self {
        self.signals.push(Signal::new(
            SignalId::new(id).expect("valid signal id"),
            signal_type,
            "0-100",
        ));
        self
    }

    pub fn with_signals(self, ids: &[&str]) -> Self {
        ids.iter()
            .fold(self, |builder, id| builder.with_signal(id, SignalType::Analog))
    }

    pub fn with_requirement(mut self, id: &str, signals: &[&str]) -> Self {
        self.requirements.push(
            Requirement::new(id, format!("Requirement {}", id))
                .expect("valid requirement id")
                .with_priority(Priority::High)
                .with_signals(signals.iter().map(|s| SignalId::new(*s).expect("valid signal id"))),
        );
        self
    }

    pub fn build(self) -> Project {
        Project::new(
            self.project_id,
            self.system,
            "Test Environment",
            self.signals,
            self.requirements,
        )
        .expect("valid project")
    }
}
