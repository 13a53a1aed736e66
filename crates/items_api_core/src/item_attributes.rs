#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAttribute {
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
}

impl ItemAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    pub fn name_placeholder(self) -> String {
        format!("#{}", self.as_str())
    }

    pub fn value_placeholder(self) -> String {
        format!(":{}", self.as_str())
    }
}

pub const PARTITION_KEY: ItemAttribute = ItemAttribute::Id;

/// Condition that only holds while a record with the addressed key exists.
pub fn item_exists_condition() -> String {
    format!("attribute_exists({})", PARTITION_KEY.name_placeholder())
}

pub fn update_title_expression() -> String {
    format!(
        "SET {} = {}, {} = {}",
        ItemAttribute::Title.name_placeholder(),
        ItemAttribute::Title.value_placeholder(),
        ItemAttribute::UpdatedAt.name_placeholder(),
        ItemAttribute::UpdatedAt.value_placeholder(),
    )
}

/// Attributes referenced by the update expression together with the
/// existence condition.
pub fn update_title_attribute_names() -> Vec<(String, &'static str)> {
    [
        PARTITION_KEY,
        ItemAttribute::Title,
        ItemAttribute::UpdatedAt,
    ]
    .into_iter()
    .map(|attribute| (attribute.name_placeholder(), attribute.as_str()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_existence_condition_on_partition_key() {
        assert_eq!(item_exists_condition(), "attribute_exists(#id)");
    }

    #[test]
    fn builds_update_expression_for_title_and_timestamp() {
        assert_eq!(
            update_title_expression(),
            "SET #title = :title, #updatedAt = :updatedAt"
        );
    }

    #[test]
    fn update_attribute_names_cover_every_placeholder() {
        let names = update_title_attribute_names();
        let expression = format!("{} {}", update_title_expression(), item_exists_condition());

        assert_eq!(names.len(), 3);
        for (placeholder, attribute) in names {
            assert!(expression.contains(&placeholder));
            assert_eq!(placeholder, format!("#{attribute}"));
        }
    }

    #[test]
    fn attribute_names_match_item_json_fields() {
        assert_eq!(ItemAttribute::CreatedAt.as_str(), "createdAt");
        assert_eq!(ItemAttribute::UpdatedAt.value_placeholder(), ":updatedAt");
    }
}
