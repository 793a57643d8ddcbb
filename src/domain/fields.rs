use indexmap::IndexMap;

use super::FieldDescriptor;

/// Ordered mapping from field key to descriptor. Insertion order is render
/// order.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    entries: IndexMap<String, FieldDescriptor>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor. A descriptor with an existing key replaces the old
    /// one and keeps its position.
    pub fn insert(&mut self, field: FieldDescriptor) -> Option<FieldDescriptor> {
        self.entries.insert(field.key.clone(), field)
    }

    pub fn with(mut self, field: FieldDescriptor) -> Self {
        self.insert(field);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldDescriptor> {
        self.entries.get_mut(key)
    }

    pub fn get_index(&self, index: usize) -> Option<&FieldDescriptor> {
        self.entries.get_index(index).map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FieldDescriptor> {
        self.entries.values_mut()
    }
}

impl FromIterator<FieldDescriptor> for FormFields {
    fn from_iter<T: IntoIterator<Item = FieldDescriptor>>(iter: T) -> Self {
        let mut fields = FormFields::new();
        for field in iter {
            fields.insert(field);
        }
        fields
    }
}

impl<'a> IntoIterator for &'a FormFields {
    type Item = &'a FieldDescriptor;
    type IntoIter = indexmap::map::Values<'a, String, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// A titled group of fields. Screens split long forms into sections such as
/// basic and billing information; the engine renders each independently.
#[derive(Debug, Clone)]
pub struct FormSection {
    pub id: String,
    pub title: String,
    pub fields: FormFields,
}

impl FormSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: FormFields) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let fields = FormFields::new()
            .with(FieldDescriptor::text("zeta"))
            .with(FieldDescriptor::text("alpha"))
            .with(FieldDescriptor::text("mid"));
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_key_replaces_in_place() {
        let mut fields = FormFields::new()
            .with(FieldDescriptor::text("a"))
            .with(FieldDescriptor::text("b"));
        let previous = fields.insert(FieldDescriptor::email("a").label("Email"));
        assert!(previous.is_some());
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get_index(0).map(|f| f.label.as_str()), Some("Email"));
    }
}
