//! Recipe List Rendering
//!
//! Pure conversion of recipes into display nodes. Edit/delete controls
//! carry the recipe id as data (`data-action`, `data-recipe-id`) so the
//! host binds listeners itself; no markup ever contains handler code.

use std::fmt::Write as _;

use crate::models::{Recipe, RecipeId};

/// Text shown when a listing is empty
pub const EMPTY_PLACEHOLDER: &str = "No recipes found.";

/// How a listing is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Public listing, no controls
    ReadOnly,
    /// The current user's recipes, with edit/delete controls
    Owner,
}

impl ListMode {
    pub fn from_owner_view(owner_view: bool) -> Self {
        if owner_view {
            ListMode::Owner
        } else {
            ListMode::ReadOnly
        }
    }
}

/// Control attached to a recipe card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit(RecipeId),
    Delete(RecipeId),
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Edit(_) => "Edit",
            CardAction::Delete(_) => "Delete",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardAction::Edit(_) => "edit",
            CardAction::Delete(_) => "delete",
        }
    }

    pub fn recipe_id(&self) -> RecipeId {
        match self {
            CardAction::Edit(id) | CardAction::Delete(id) => *id,
        }
    }
}

/// One rendered recipe
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCard {
    pub id: RecipeId,
    pub title: String,
    /// `By: <owner>` when the owner is known
    pub owner_line: Option<String>,
    /// Image source, only for `data:image/...` URIs
    pub image_src: Option<String>,
    pub description: String,
    pub actions: Vec<CardAction>,
}

/// Result of rendering a listing
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeList {
    Placeholder,
    Cards { mode: ListMode, cards: Vec<RecipeCard> },
}

/// Render recipes for display
pub fn render_recipes(items: &[Recipe], mode: ListMode) -> RecipeList {
    if items.is_empty() {
        return RecipeList::Placeholder;
    }

    let cards = items
        .iter()
        .map(|recipe| RecipeCard {
            id: recipe.id,
            title: recipe.title.clone(),
            owner_line: recipe.owner.as_ref().map(|o| format!("By: {}", o)),
            image_src: recipe
                .image_data
                .as_ref()
                .filter(|src| is_image_data_uri(src))
                .cloned(),
            description: recipe.description.clone(),
            actions: match mode {
                ListMode::Owner => vec![CardAction::Edit(recipe.id), CardAction::Delete(recipe.id)],
                ListMode::ReadOnly => Vec::new(),
            },
        })
        .collect();

    RecipeList::Cards { mode, cards }
}

fn is_image_data_uri(src: &str) -> bool {
    src.get(..11)
        .map(|prefix| prefix.eq_ignore_ascii_case("data:image/"))
        .unwrap_or(false)
}

impl RecipeList {
    pub fn len(&self) -> usize {
        match self {
            RecipeList::Placeholder => 0,
            RecipeList::Cards { cards, .. } => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cards(&self) -> &[RecipeCard] {
        match self {
            RecipeList::Placeholder => &[],
            RecipeList::Cards { cards, .. } => cards,
        }
    }

    /// HTML fragment for the recipe container
    pub fn to_html(&self) -> String {
        let cards = match self {
            RecipeList::Placeholder => {
                return format!("<p class=\"muted\">{}</p>", EMPTY_PLACEHOLDER);
            }
            RecipeList::Cards { cards, .. } => cards,
        };

        let mut html = String::new();
        for card in cards {
            let _ = write!(html, "<div class=\"recipe-card\" data-recipe-id=\"{}\">", card.id);
            let _ = write!(html, "<h4>{}</h4>", escape_html(card.title.as_str()));
            if let Some(owner_line) = &card.owner_line {
                let _ = write!(html, "<div class=\"meta\">{}</div>", escape_html(owner_line.as_str()));
            }
            if let Some(src) = &card.image_src {
                let _ = write!(
                    html,
                    "<img class=\"recipe-img\" src=\"{}\" alt=\"\">",
                    escape_html(src.as_str())
                );
            }
            let _ = write!(html, "<p>{}</p>", escape_html(card.description.as_str()));
            if !card.actions.is_empty() {
                html.push_str("<div class=\"actions\">");
                for action in &card.actions {
                    let class = match action {
                        CardAction::Edit(_) => "btn outline",
                        CardAction::Delete(_) => "btn",
                    };
                    let _ = write!(
                        html,
                        "<button class=\"{}\" data-action=\"{}\" data-recipe-id=\"{}\">{}</button>",
                        class,
                        action.name(),
                        action.recipe_id(),
                        action.label()
                    );
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
        }
        html
    }

    /// Plain-text rendering for terminals
    pub fn to_text(&self) -> String {
        let cards = match self {
            RecipeList::Placeholder => return EMPTY_PLACEHOLDER.to_string(),
            RecipeList::Cards { cards, .. } => cards,
        };

        let mut out = String::new();
        for card in cards {
            let _ = writeln!(out, "#{} {}", card.id, card.title);
            if let Some(owner_line) = &card.owner_line {
                let _ = writeln!(out, "   {}", owner_line);
            }
            if card.image_src.is_some() {
                let _ = writeln!(out, "   [image]");
            }
            if !card.description.is_empty() {
                let _ = writeln!(out, "   {}", card.description);
            }
            if !card.actions.is_empty() {
                let labels: Vec<&str> = card.actions.iter().map(|a| a.label()).collect();
                let _ = writeln!(out, "   [{}]", labels.join("] ["));
            }
        }
        out
    }
}

/// Escape text for HTML element content and quoted attribute values.
/// `None` yields an empty string.
pub fn escape_html<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a single- or double-quoted script string literal.
/// `None` yields an empty string.
pub fn escape_js<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}
