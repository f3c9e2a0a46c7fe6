use nodeshare::core::error::{CONTEXT_CONVERTER, CONTEXT_DEFINITION, CONTEXT_INVARIANT};
use nodeshare::core::{
    ApprovalLanguage, CommandApprover, Conversion, Converter, ConverterRegistry,
    DefinitionFormat, ErrorCategory, InMemoryApprovalRegistry, LaunchMechanism, NodeDefinition,
    NodeMode, RetentionPolicy, SharedNode, XmlConverter,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn node_xml(executors: u32, launcher: &str) -> String {
    format!(
        r#"<sharedNode>
  <name>solaris1.acme.com</name>
  <remoteFS>/var/jenkins</remoteFS>
  <numExecutors>{}</numExecutors>
  <mode>NORMAL</mode>
  <label>solaris10 sparc</label>
  <retentionStrategy class="always"/>
  {}
</sharedNode>"#,
        executors, launcher
    )
}

const COMMAND_LAUNCHER: &str =
    r#"<launcher class="hudson.slaves.CommandLauncher"><agentCommand>run.sh</agentCommand></launcher>"#;
const INBOUND_LAUNCHER: &str = r#"<launcher class="inbound"><workDir>/tmp/agent</workDir></launcher>"#;

fn xml_only(approvals: Arc<InMemoryApprovalRegistry>) -> ConverterRegistry {
    let mut builder = ConverterRegistry::builder(approvals);
    builder.register(XmlConverter::new()).unwrap();
    builder.build()
}

/// Records every approval call, including repeats.
#[derive(Default)]
struct RecordingApprover {
    calls: Mutex<Vec<(String, ApprovalLanguage)>>,
}

impl CommandApprover for RecordingApprover {
    fn preapprove(&self, script: &str, language: ApprovalLanguage) {
        self.calls
            .lock()
            .unwrap()
            .push((script.to_string(), language));
    }
}

/// Accepts every definition, producing a node named after itself.
struct Greedy(&'static str);

impl Converter for Greedy {
    fn name(&self) -> &'static str {
        self.0
    }

    fn create(&self, _definition: &NodeDefinition) -> Conversion {
        Conversion::Created(SharedNode::new(
            self.0,
            LaunchMechanism::Inbound { work_dir: None },
        ))
    }
}

/// Declines everything and counts how often it was asked.
struct Observer(Arc<AtomicUsize>);

impl Converter for Observer {
    fn name(&self) -> &'static str {
        "observer"
    }

    fn create(&self, _definition: &NodeDefinition) -> Conversion {
        self.0.fetch_add(1, Ordering::SeqCst);
        Conversion::Declined
    }
}

#[test]
fn valid_xml_node_is_decorated_and_command_preapproved() {
    let approvals = Arc::new(InMemoryApprovalRegistry::new());
    let registry = xml_only(approvals.clone());
    let definition = NodeDefinition::new(
        DefinitionFormat::Xml,
        node_xml(1, COMMAND_LAUNCHER),
        "solaris1.acme.com.xml",
    );

    let node = registry.transform(definition).unwrap();

    assert_eq!(node.name, "solaris1.acme.com");
    assert_eq!(node.num_executors, 1);
    assert_eq!(node.mode, NodeMode::Exclusive);
    assert_eq!(node.retention, RetentionPolicy::Once { max_uses: 1 });
    assert_eq!(node.labels, vec!["solaris10", "sparc"]);
    assert!(approvals.is_approved("run.sh", ApprovalLanguage::SystemCommand));
}

#[test]
fn two_executors_violate_policy() {
    let approvals = Arc::new(InMemoryApprovalRegistry::new());
    let registry = xml_only(approvals);
    let definition = NodeDefinition::new(
        DefinitionFormat::Xml,
        node_xml(2, COMMAND_LAUNCHER),
        "solaris1.acme.com.xml",
    );

    let err = registry.transform(definition).unwrap_err();

    assert_eq!(err.category, ErrorCategory::PolicyViolation);
    assert!(err.is_unusable_definition());
    assert!(err.message.contains("solaris1.acme.com.xml"));
    assert_eq!(err.detail(CONTEXT_INVARIANT), Some("num_executors == 1"));
    assert_eq!(err.detail(CONTEXT_CONVERTER), Some("xml"));
}

#[test]
fn unknown_format_finds_no_converter() {
    let approvals = Arc::new(InMemoryApprovalRegistry::new());
    let registry = xml_only(approvals.clone());
    let definition = NodeDefinition::new(
        DefinitionFormat::from_tag("yaml"),
        "name: solaris1",
        "solaris1.yaml",
    );

    let err = registry.transform(definition).unwrap_err();

    assert_eq!(err.category, ErrorCategory::NoConverterFound);
    assert!(err.is_unusable_definition());
    assert!(err.message.contains("solaris1.yaml"));
    assert_eq!(err.detail(CONTEXT_DEFINITION), Some("solaris1.yaml"));
    assert_eq!(registry.converter_names(), vec!["xml"]);
    assert!(approvals.is_empty());
}

#[test]
fn xml_of_another_type_is_invalid() {
    let registry = xml_only(Arc::new(InMemoryApprovalRegistry::new()));
    let definition = NodeDefinition::new(
        DefinitionFormat::Xml,
        "<hudson.model.FreeStyleProject><disabled>false</disabled></hudson.model.FreeStyleProject>",
        "project.xml",
    );

    let err = registry.transform(definition).unwrap_err();

    assert_eq!(err.category, ErrorCategory::InvalidDefinition);
    assert!(err.message.contains("project.xml"));
    assert_eq!(err.detail(CONTEXT_CONVERTER), Some("xml"));
    assert!(err.source.is_some());
}

#[test]
fn malformed_xml_is_invalid() {
    let registry = xml_only(Arc::new(InMemoryApprovalRegistry::new()));
    let definition = NodeDefinition::new(
        DefinitionFormat::Xml,
        "<sharedNode><name>broken</sharedNode>",
        "broken.xml",
    );

    let err = registry.transform(definition).unwrap_err();
    assert_eq!(err.category, ErrorCategory::InvalidDefinition);
}

#[test]
fn trailing_content_after_root_is_invalid() {
    let approvals = Arc::new(InMemoryApprovalRegistry::new());
    let registry = xml_only(approvals.clone());
    let payload = format!("{}<extra/>", node_xml(1, COMMAND_LAUNCHER));
    let definition = NodeDefinition::new(DefinitionFormat::Xml, payload, "trailing.xml");

    let err = registry.transform(definition).unwrap_err();

    assert_eq!(err.category, ErrorCategory::InvalidDefinition);
    assert!(err.message.contains("trailing.xml"));
    assert!(approvals.is_empty());
}

#[test]
fn xml_tag_spelled_any_way_reaches_the_xml_converter() {
    for tag in ["xml", "XML", " Xml "] {
        let approvals = Arc::new(InMemoryApprovalRegistry::new());
        let registry = xml_only(approvals.clone());
        let from_tag = NodeDefinition::new(
            DefinitionFormat::from_tag(tag),
            node_xml(1, COMMAND_LAUNCHER),
            "n.xml",
        );
        let from_string = NodeDefinition::new(
            DefinitionFormat::from(tag.to_string()),
            node_xml(1, COMMAND_LAUNCHER),
            "n.xml",
        );

        assert!(registry.transform(from_tag).is_ok(), "{tag:?}");
        assert!(registry.transform(from_string).is_ok(), "{tag:?}");
        assert!(approvals.is_approved("run.sh", ApprovalLanguage::SystemCommand));
    }
}

#[test]
fn padded_command_is_approved_as_stored() {
    let approvals = Arc::new(InMemoryApprovalRegistry::new());
    let registry = xml_only(approvals.clone());
    let launcher = "<launcher class=\"command\"><agentCommand>\n    ssh solaris1  java -jar agent.jar\n  </agentCommand></launcher>";
    let definition = NodeDefinition::new(DefinitionFormat::Xml, node_xml(1, launcher), "padded.xml");

    let node = registry.transform(definition).unwrap();

    let command = node.launcher.command().unwrap();
    assert_eq!(command, "ssh solaris1  java -jar agent.jar");
    assert!(approvals.is_approved(command, ApprovalLanguage::SystemCommand));
    assert_eq!(approvals.len(), 1);
}

#[test]
fn non_command_launcher_is_not_preapproved() {
    let approver = Arc::new(RecordingApprover::default());
    let mut builder = ConverterRegistry::builder(approver.clone());
    builder.register(XmlConverter::new()).unwrap();
    let registry = builder.build();

    let node = registry
        .transform(NodeDefinition::new(
            DefinitionFormat::Xml,
            node_xml(1, INBOUND_LAUNCHER),
            "inbound.xml",
        ))
        .unwrap();

    assert_eq!(node.mode, NodeMode::Exclusive);
    assert!(approver.calls.lock().unwrap().is_empty());
}

#[test]
fn command_is_approved_exactly_once_per_transform() {
    let approver = Arc::new(RecordingApprover::default());
    let registry = ConverterRegistry::with_defaults(approver.clone());

    registry
        .transform(NodeDefinition::from_file_name(
            "solaris1.xml",
            node_xml(1, COMMAND_LAUNCHER),
        ))
        .unwrap();

    let calls = approver.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![("run.sh".to_string(), ApprovalLanguage::SystemCommand)]
    );
}

#[test]
fn registration_order_decides_the_winner() {
    let definition = || NodeDefinition::new(DefinitionFormat::Xml, "<any/>", "any.xml");

    let mut builder = ConverterRegistry::builder(Arc::new(InMemoryApprovalRegistry::new()));
    builder.register(Greedy("alpha")).unwrap();
    builder.register(Greedy("beta")).unwrap();
    assert_eq!(builder.build().transform(definition()).unwrap().name, "alpha");

    let mut builder = ConverterRegistry::builder(Arc::new(InMemoryApprovalRegistry::new()));
    builder.register(Greedy("beta")).unwrap();
    builder.register(Greedy("alpha")).unwrap();
    assert_eq!(builder.build().transform(definition()).unwrap().name, "beta");
}

#[test]
fn declining_converter_falls_through_to_next() {
    let asked = Arc::new(AtomicUsize::new(0));
    let mut builder = ConverterRegistry::builder(Arc::new(InMemoryApprovalRegistry::new()));
    builder.register(Observer(asked.clone())).unwrap();
    builder.register(Greedy("fallback")).unwrap();
    let registry = builder.build();

    let node = registry
        .transform(NodeDefinition::new(DefinitionFormat::Json, "{}", "n.json"))
        .unwrap();

    assert_eq!(node.name, "fallback");
    assert_eq!(asked.load(Ordering::SeqCst), 1);
}

#[test]
fn failing_converter_stops_lookup() {
    let asked = Arc::new(AtomicUsize::new(0));
    let mut builder = ConverterRegistry::builder(Arc::new(InMemoryApprovalRegistry::new()));
    builder.register(XmlConverter::new()).unwrap();
    builder.register(Observer(asked.clone())).unwrap();
    builder.register(Greedy("fallback")).unwrap();
    let registry = builder.build();

    let err = registry
        .transform(NodeDefinition::new(DefinitionFormat::Xml, "", "empty.xml"))
        .unwrap_err();

    assert_eq!(err.category, ErrorCategory::InvalidDefinition);
    assert_eq!(asked.load(Ordering::SeqCst), 0);
}

#[test]
fn every_transformed_node_satisfies_shared_policy() {
    let approvals = Arc::new(InMemoryApprovalRegistry::new());
    let registry = ConverterRegistry::with_defaults(approvals.clone());
    let definitions = vec![
        NodeDefinition::from_file_name("a.xml", node_xml(1, COMMAND_LAUNCHER)),
        NodeDefinition::from_file_name("b.xml", node_xml(1, INBOUND_LAUNCHER)),
        NodeDefinition::from_file_name(
            "c.json",
            r#"{"name": "c", "mode": "EXCLUSIVE", "retentionStrategy": {"class": "demand", "idleMinutes": 30},
                "launcher": {"class": "ssh", "host": "c.example.com", "port": 2222}}"#,
        ),
        NodeDefinition::from_file_name(
            "d.json",
            r#"{"name": "d", "retentionStrategy": {"class": "once", "maxUses": 5},
                "launcher": {"class": "command", "agentCommand": "java -jar agent.jar"}}"#,
        ),
    ];

    for definition in definitions {
        let node = registry.transform(definition).unwrap();
        assert_eq!(node.num_executors, 1);
        assert_eq!(node.mode, NodeMode::Exclusive);
        assert!(node.retention.is_use_once());
    }

    assert_eq!(
        approvals.approved_scripts(ApprovalLanguage::SystemCommand),
        vec!["java -jar agent.jar".to_string(), "run.sh".to_string()]
    );
}
