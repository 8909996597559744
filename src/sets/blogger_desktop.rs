use crate::pageset::{PageSet, PageSetBuilder, UserAgentType};

/// Pages designed to represent the median, not highly optimized web
pub fn blogger_desktop() -> PageSet {
    PageSetBuilder::new("blogger_desktop")
        .with_description("Pages designed to represent the median, not highly optimized web")
        .with_user_agent_type(UserAgentType::Desktop)
        .with_archive_data_file("data/blogger_desktop.json")
        .with_credentials_path("data/credentials.json")
        .with_wait_seconds(15)
        .add_page_with_description(
            "http://googlewebmastercentral.blogspot.com/",
            "#11 (Alexa global), google property; some blogger layouts \
             have infinite scroll but more interesting",
        )
        .build()
        .expect("built-in page set should validate")
}
