pub mod item_view;
mod surface;
pub mod text;

pub use surface::Surface;

/// Platform limit on the length of a single field value.
pub const FIELD_VALUE_MAX: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

/// Structured chat message: the display model sent to, and later edited on, a chat surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub color: u32,
    pub author: Option<EmbedAuthor>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
    pub footer: Option<String>,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(color: u32) -> Self {
        Self { color, ..Default::default() }
    }

    pub fn author(mut self, name: impl Into<String>, icon_url: impl Into<String>) -> Self {
        self.author = Some(EmbedAuthor { name: name.into(), icon_url: Some(icon_url.into()) });
        self
    }

    /// Author line without an icon.
    pub fn title(mut self, name: impl Into<String>) -> Self {
        self.author = Some(EmbedAuthor { name: name.into(), icon_url: None });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(EmbedField { name: name.into(), value: value.into() });
    }

    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Replaces the value of the first field called `name`. Returns false if there is none.
    pub fn set_field_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_insertion_order_and_patch_in_place() {
        let mut e = Embed::new(0xFFD700).author("Iron Ingot", "logo.png");
        e.add_field("Crafter", "Blacksmith");
        e.add_field("Ingredient For", "Fetching 2 items");
        e.add_field("Links", "[Teamcraft](x)");

        assert!(e.set_field_value("Ingredient For", "[Iron Sword](y)"));
        assert!(!e.set_field_value("Missing", "z"));

        let names: Vec<_> = e.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Crafter", "Ingredient For", "Links"]);
        assert_eq!(e.field("Ingredient For").unwrap().value, "[Iron Sword](y)");
    }
}
