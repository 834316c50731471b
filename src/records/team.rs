use crate::forms::{FieldSchema, FieldSpec};

record_fields!(TeamMemberField {
    Name => ("name", "Name"),
    Role => ("role", "Role"),
    Bio => ("bio", "Bio"),
    ProfileImage => ("profile_image", "Profile image"),
    Certificates => ("certificates", "Certificates"),
    Expertise => ("expertise", "Expertise"),
    SocialLinks => ("social_links", "Social links"),
});

pub fn team_member_schema() -> FieldSchema<TeamMemberField> {
    FieldSchema::new(
        "team member",
        vec![
            FieldSpec::text(TeamMemberField::Name).with_required(),
            FieldSpec::text(TeamMemberField::Role).with_required(),
            FieldSpec::text(TeamMemberField::Bio),
            FieldSpec::text(TeamMemberField::ProfileImage).with_required(),
            FieldSpec::string_list(TeamMemberField::Certificates),
            FieldSpec::string_list(TeamMemberField::Expertise).with_min_items(1),
            FieldSpec::link_map(TeamMemberField::SocialLinks, &exameets_domain::SocialLinks::KEYS),
        ],
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use exameets_domain::TeamMember;

    use super::*;
    use crate::forms::{is_valid, BufferKey, FormStore};
    use crate::records::decode;

    #[test]
    fn member_links_decode_into_social_links() {
        let mut store = FormStore::new(Arc::new(team_member_schema()));
        store.set_scalar(TeamMemberField::Name, "Asha");
        store.set_scalar(TeamMemberField::Role, "Mentor");
        store.set_scalar(TeamMemberField::ProfileImage, "https://cdn.example/asha.png");
        store.set_pending_input(BufferKey::Item(TeamMemberField::Expertise), "Physics");
        store.commit_list_item(TeamMemberField::Expertise);
        store.set_link(TeamMemberField::SocialLinks, "linkedin", "https://linkedin.com/in/asha");
        assert!(is_valid(&store));

        let member: TeamMember = decode(&store).expect("decode");
        assert_eq!(member.social_links.linkedin, "https://linkedin.com/in/asha");
        assert_eq!(member.social_links.github, "");
        assert_eq!(member.expertise, ["Physics"]);
    }
}
