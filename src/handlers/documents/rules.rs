//! Allow rules and authorization policy for document routes

use crate::{
    action::Action,
    constants::actions,
    middleware::AllowState,
    models::{DocumentResource, DocumentStatus},
    registry::RuleRegistry,
    rule::RuleDeclaration,
    scope::ResourceSlots,
    strategy::AllowConfig,
};

/// Scope type used by document routes
pub type DocumentScope = ResourceSlots<DocumentResource>;

/// Rules declared for the document routes
pub fn document_rules() -> RuleRegistry<DocumentScope> {
    RuleRegistry::new()
        .with(RuleDeclaration::get())
        // Creating is checked against the collection, whatever the handler loaded
        .with(
            RuleDeclaration::post()
                .only(["index", "create"])
                .resource(|_| Ok(Some(DocumentResource::Collection))),
        )
        .with(RuleDeclaration::put().except(["index", "create"]))
        .with(RuleDeclaration::patch().except(["index", "create"]))
        .with(RuleDeclaration::delete().except(["index", "create"]))
}

/// Document authorization policy
///
/// Anything can be read, the collection accepts new documents, archived
/// documents are read-only and only drafts can be deleted.
pub fn document_policy(
    action: &Action,
    resource: Option<&DocumentResource>,
) -> anyhow::Result<bool> {
    let Some(resource) = resource else {
        return Ok(false);
    };

    Ok(match (action.as_str(), resource) {
        (actions::SHOW, _) => true,
        (actions::CREATE, DocumentResource::Collection) => true,
        (actions::UPDATE, DocumentResource::Member(doc)) => doc.status != DocumentStatus::Archived,
        (actions::DESTROY, DocumentResource::Member(doc)) => doc.status == DocumentStatus::Draft,
        _ => false,
    })
}

/// Allow state shared by all document routes
pub fn allow_state() -> AllowState<DocumentResource> {
    AllowState::new(document_rules(), AllowConfig::default(), document_policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;

    fn member(status: DocumentStatus) -> DocumentResource {
        DocumentResource::Member(Document {
            id: 1,
            title: "Notes".to_string(),
            status,
        })
    }

    #[test]
    fn test_policy_without_resource_denies() {
        assert!(!document_policy(&Action::SHOW, None).unwrap());
    }

    #[test]
    fn test_policy_collection() {
        let collection = DocumentResource::Collection;
        assert!(document_policy(&Action::SHOW, Some(&collection)).unwrap());
        assert!(document_policy(&Action::CREATE, Some(&collection)).unwrap());
        assert!(!document_policy(&Action::DESTROY, Some(&collection)).unwrap());
    }

    #[test]
    fn test_policy_member_status() {
        let draft = member(DocumentStatus::Draft);
        let archived = member(DocumentStatus::Archived);

        assert!(document_policy(&Action::UPDATE, Some(&draft)).unwrap());
        assert!(document_policy(&Action::DESTROY, Some(&draft)).unwrap());
        assert!(!document_policy(&Action::UPDATE, Some(&archived)).unwrap());
        assert!(!document_policy(&Action::DESTROY, Some(&archived)).unwrap());
    }

    #[test]
    fn test_rules_per_action() {
        let rules = document_rules();
        assert_eq!(rules.active_rules("index").len(), 2);
        assert_eq!(rules.active_rules("show").len(), 4);
    }
}
