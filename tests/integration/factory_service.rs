//! Factory service behavior over every backend.

use super::support::{all_stores, names, service_over};
use agent_factory::agent::templates::TEMPLATE_METADATA_KEY;
use agent_factory::agent::TemplateCustomizations;
use agent_factory::{AgentRole, ApiError, CreateAgentRequest};
use std::collections::HashSet;

fn crm_request() -> CreateAgentRequest {
    CreateAgentRequest::new("crm_specialist", "assistant", "Manage customer contacts")
}

#[test]
fn crm_specialist_scenario() {
    for fixture in all_stores() {
        let service = service_over(fixture.store.clone());

        service.create_agent(crm_request()).unwrap();

        let listed = service.list_agents().unwrap();
        assert_eq!(listed.len(), 1, "backend {}", fixture.label);
        assert_eq!(listed[0].name, "crm_specialist");
        assert_eq!(listed[0].role, AgentRole::Assistant);

        let code = service.agent_code("crm_specialist").unwrap();
        assert!(!code.is_empty());
        assert!(code.contains("Manage customer contacts"));
        assert!(code.contains("\"crm_specialist\""));

        let err = service.create_agent(crm_request()).unwrap_err();
        assert!(matches!(err, ApiError::DuplicateName(_)), "backend {}", fixture.label);
        assert_eq!(service.agent_code("crm_specialist").unwrap(), code);
        assert_eq!(service.list_agents().unwrap().len(), 1);
    }
}

#[test]
fn creations_are_listed_in_order() {
    for fixture in all_stores() {
        let service = service_over(fixture.store.clone());
        let roles = ["assistant", "coder", "researcher"];
        let expected: Vec<String> = (0..9).map(|i| format!("agent_{:02}", i)).collect();
        for (i, name) in expected.iter().enumerate() {
            service
                .create_agent(CreateAgentRequest::new(name, roles[i % 3], "Do the work"))
                .unwrap();
        }

        let listed: Vec<String> = service
            .list_agents()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(listed, expected, "backend {}", fixture.label);
        let unique: HashSet<_> = listed.iter().collect();
        assert_eq!(unique.len(), listed.len());
    }
}

#[test]
fn rejected_requests_do_not_touch_the_store() {
    for fixture in all_stores() {
        let service = service_over(fixture.store.clone());

        let err = service
            .create_agent(CreateAgentRequest::new("boss", "manager", "Run the team"))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRole(_)));

        let err = service
            .create_agent(CreateAgentRequest::new("", "coder", "Write code"))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        let err = service
            .create_agent(CreateAgentRequest::new("../escape", "coder", "Write code"))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        let err = service
            .create_agent(CreateAgentRequest::new("quiet", "coder", "   "))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        assert!(names(fixture.store.as_ref()).is_empty(), "backend {}", fixture.label);
    }
}

#[test]
fn missing_agent_code_is_not_found() {
    for fixture in all_stores() {
        let service = service_over(fixture.store.clone());
        assert!(matches!(
            service.agent_code("nobody"),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(service.get_agent("nobody"), Err(ApiError::NotFound(_))));
    }
}

#[test]
fn code_is_stable_across_reads() {
    for fixture in all_stores() {
        let service = service_over(fixture.store.clone());
        let created = service
            .create_agent(
                CreateAgentRequest::new(
                    "quoter",
                    "researcher",
                    "Quote sources like \"this\" and paths like C:\\data",
                )
                .with_capabilities(["web_search", "pdf_reading"]),
            )
            .unwrap();
        let first = service.agent_code("quoter").unwrap();
        let second = service.agent_code("quoter").unwrap();
        assert_eq!(first, second);
        assert_eq!(Some(first), created.generated_code, "backend {}", fixture.label);
    }
}

#[test]
fn template_creation_records_origin() {
    for fixture in all_stores() {
        let service = service_over(fixture.store.clone());
        let created = service
            .create_from_template(
                "code_specialist",
                "py_helper",
                TemplateCustomizations {
                    capabilities: vec!["rust".to_string()],
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(created.role, AgentRole::Coder);
        assert!(created.capabilities.contains("python"));
        assert!(created.capabilities.contains("rust"));

        let stored = service.get_agent("py_helper").unwrap();
        assert_eq!(
            stored.metadata.get(TEMPLATE_METADATA_KEY).map(String::as_str),
            Some("code_specialist"),
            "backend {}",
            fixture.label
        );
    }
}
