//! Demo data loaded into a fresh store
//!
//! Four agents, ten tools and one sample conversation, matching what the
//! catalog UI expects to show on first launch.

use crate::state::agent::{Agent, AgentStatus, AgentType};
use crate::state::conversation::{Conversation, Message, MessageSender, MessageType};
use crate::state::tool::Tool;
use chrono::{DateTime, TimeZone, Utc};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn agent(
    id: &str,
    name: &str,
    description: &str,
    agent_type: AgentType,
    status: AgentStatus,
    avatar: &str,
    last_used: &str,
    conversations: u32,
    system_prompt: &str,
    tools: &[&str],
    icon_name: &str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Agent {
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        agent_type,
        status,
        avatar: avatar.to_string(),
        last_used: last_used.to_string(),
        conversations,
        system_prompt: system_prompt.to_string(),
        tools: tools.iter().map(|t| t.to_string()).collect(),
        icon_name: icon_name.to_string(),
        created_at,
        updated_at,
    }
}

/// The demo agent catalog
pub fn demo_agents() -> Vec<Agent> {
    vec![
        agent(
            "1",
            "Code Assistant",
            "Helps with programming tasks and code review",
            AgentType::Text,
            AgentStatus::Active,
            "/robot-coding.jpg",
            "2 hours ago",
            24,
            "You are a helpful coding assistant. Help users with programming tasks, code review, and technical questions.",
            &["code_execution", "web_search", "file_analysis"],
            "Code",
            at(2024, 1, 15, 0, 0),
            at(2024, 1, 20, 0, 0),
        ),
        agent(
            "2",
            "Image Generator",
            "Creates stunning visuals and artwork",
            AgentType::Image,
            AgentStatus::Active,
            "/ai-art-generator.jpg",
            "1 hour ago",
            18,
            "You are an AI image generator. Create beautiful, detailed images based on user descriptions.",
            &["image_generation", "style_transfer"],
            "ImageIcon",
            at(2024, 1, 10, 0, 0),
            at(2024, 1, 19, 0, 0),
        ),
        agent(
            "3",
            "Research Assistant",
            "Analyzes data and provides insights",
            AgentType::Text,
            AgentStatus::Idle,
            "/research-assistant.png",
            "5 hours ago",
            12,
            "You are a research assistant. Help users analyze data, find information, and provide insights.",
            &["web_search", "data_analysis", "document_processing"],
            "Brain",
            at(2024, 1, 12, 0, 0),
            at(2024, 1, 18, 0, 0),
        ),
        agent(
            "4",
            "Design Helper",
            "UI/UX design guidance and feedback",
            AgentType::Text,
            AgentStatus::Active,
            "/design-assistant.png",
            "30 minutes ago",
            31,
            "You are a UI/UX design expert. Provide guidance on design principles, user experience, and visual aesthetics.",
            &["design_analysis", "color_palette", "layout_suggestions"],
            "Palette",
            at(2024, 1, 8, 0, 0),
            at(2024, 1, 21, 0, 0),
        ),
    ]
}

/// The demo tool list, all enabled
pub fn demo_tools() -> Vec<Tool> {
    [
        ("web_search", "Web Search", "Search the internet for information", "Research"),
        ("code_execution", "Code Execution", "Execute and analyze code", "Development"),
        ("file_analysis", "File Analysis", "Analyze and process files", "Productivity"),
        ("image_generation", "Image Generation", "Generate images from text", "Creative"),
        ("data_analysis", "Data Analysis", "Analyze and visualize data", "Analytics"),
        ("document_processing", "Document Processing", "Process and extract from documents", "Productivity"),
        ("style_transfer", "Style Transfer", "Apply artistic styles to images", "Creative"),
        ("color_palette", "Color Palette", "Generate color schemes", "Design"),
        ("layout_suggestions", "Layout Suggestions", "Suggest UI/UX layouts", "Design"),
        ("design_analysis", "Design Analysis", "Analyze design patterns", "Design"),
    ]
    .into_iter()
    .map(|(id, name, description, category)| Tool {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        enabled: true,
    })
    .collect()
}

fn seed_message(id: &str, sender: MessageSender, content: &str, timestamp: DateTime<Utc>) -> Message {
    Message {
        id: id.to_string(),
        agent_id: "1".to_string(),
        content: content.to_string(),
        sender,
        timestamp,
        message_type: MessageType::Text,
        image_url: None,
        metadata: None,
    }
}

/// One sample conversation with the code assistant
pub fn demo_conversations() -> Vec<Conversation> {
    vec![Conversation {
        id: "conv-1".to_string(),
        agent_id: "1".to_string(),
        title: "React Component Help".to_string(),
        messages: vec![
            seed_message(
                "msg-1",
                MessageSender::Agent,
                "Hello! I'm Code Assistant. How can I help you with programming today?",
                at(2024, 1, 21, 10, 0),
            ),
            seed_message(
                "msg-2",
                MessageSender::User,
                "Can you help me create a React component for a user profile card?",
                at(2024, 1, 21, 10, 1),
            ),
        ],
        created_at: at(2024, 1, 21, 10, 0),
        updated_at: at(2024, 1, 21, 10, 1),
    }]
}
