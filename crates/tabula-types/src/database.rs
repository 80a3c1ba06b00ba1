use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    CellValue, DatabaseId, Error, Item, ItemId, PageId, Property, PropertyId, PropertyType,
    Result, SelectOption, View, ViewId, ViewKind,
};

/// A tabular database: schema, rows and saved views.
///
/// Mutations go through the repository-style methods below. View evaluation
/// lives in `tabula-engine` and only ever borrows a `Database`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub id: DatabaseId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub views: Vec<View>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_view_id: Option<ViewId>,
}

impl Database {
    /// New database with its mandatory title property and one active table view.
    pub fn new(title: impl Into<String>) -> Self {
        let title_property = Property::new(PropertyId::generate(), "Name", PropertyType::Title);
        let view = View::new(ViewId::generate(), "Table", ViewKind::Table);
        let active_view_id = Some(view.id.clone());

        Self {
            id: DatabaseId::generate(),
            title: title.into(),
            icon: None,
            properties: vec![title_property],
            items: Vec::new(),
            views: vec![view],
            active_view_id,
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let database = serde_json::from_str(&content)?;
        Ok(database)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub fn property(&self, id: &PropertyId) -> Option<&Property> {
        self.properties.iter().find(|p| &p.id == id)
    }

    pub fn title_property(&self) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_title())
    }

    fn property_mut(&mut self, id: &PropertyId) -> Result<&mut Property> {
        self.properties
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| Error::PropertyNotFound(id.clone()))
    }

    /// Append a property. The new property is ordered after the existing ones.
    pub fn add_property(&mut self, name: impl Into<String>, kind: PropertyType) -> Result<PropertyId> {
        if kind == PropertyType::Title && self.title_property().is_some() {
            return Err(Error::DuplicateTitle);
        }

        let mut property = Property::new(PropertyId::generate(), name, kind);
        property.order = self
            .properties
            .iter()
            .map(|p| p.order + 1)
            .max()
            .unwrap_or(0);
        let id = property.id.clone();
        self.properties.push(property);
        Ok(id)
    }

    pub fn rename_property(&mut self, id: &PropertyId, name: impl Into<String>) -> Result<()> {
        self.property_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_property_visibility(&mut self, id: &PropertyId, visible: bool) -> Result<()> {
        self.property_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn add_select_option(
        &mut self,
        id: &PropertyId,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<()> {
        let label = label.into();
        let property = self.property_mut(id)?;

        if !property.kind.has_options() {
            return Err(Error::NotASelectProperty(id.clone()));
        }
        if property.option(&label).is_some() {
            return Err(Error::DuplicateOption {
                property: id.clone(),
                label,
            });
        }

        property.config.options.push(SelectOption::new(label, color));
        Ok(())
    }

    /// Remove a property and its stored values.
    ///
    /// Views that reference it keep their filters/sorts/group-by; evaluation
    /// treats those references as dangling.
    pub fn delete_property(&mut self, id: &PropertyId) -> Result<Property> {
        let index = self
            .properties
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| Error::PropertyNotFound(id.clone()))?;

        if self.properties[index].is_title() {
            return Err(Error::TitleProtected(id.clone()));
        }

        for item in &mut self.items {
            item.clear(id);
        }
        Ok(self.properties.remove(index))
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Append a row (and its page) with the given title.
    pub fn add_item(&mut self, title: impl Into<String>) -> ItemId {
        let mut item = Item::new(ItemId::generate(), PageId::generate());
        if let Some(title_property) = self.title_property() {
            item.set(title_property.id.clone(), CellValue::Text(title.into()));
        }
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Set one cell. Only that item changes.
    pub fn set_value(
        &mut self,
        item_id: &ItemId,
        property_id: &PropertyId,
        value: impl Into<CellValue>,
    ) -> Result<()> {
        if self.property(property_id).is_none() {
            return Err(Error::PropertyNotFound(property_id.clone()));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == item_id)
            .ok_or_else(|| Error::ItemNotFound(item_id.clone()))?;

        item.set(property_id.clone(), value);
        Ok(())
    }

    pub fn clear_value(&mut self, item_id: &ItemId, property_id: &PropertyId) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == item_id)
            .ok_or_else(|| Error::ItemNotFound(item_id.clone()))?;

        item.clear(property_id);
        Ok(())
    }

    pub fn delete_item(&mut self, id: &ItemId) -> Result<Item> {
        let index = self
            .items
            .iter()
            .position(|i| &i.id == id)
            .ok_or_else(|| Error::ItemNotFound(id.clone()))?;
        Ok(self.items.remove(index))
    }

    // ------------------------------------------------------------------
    // Views and active-view selection
    // ------------------------------------------------------------------

    pub fn view(&self, id: &ViewId) -> Option<&View> {
        self.views.iter().find(|v| &v.id == id)
    }

    pub fn view_mut(&mut self, id: &ViewId) -> Result<&mut View> {
        self.views
            .iter_mut()
            .find(|v| &v.id == id)
            .ok_or_else(|| Error::ViewNotFound(id.clone()))
    }

    /// The view `active_view_id` names, else the first view, else `None`.
    pub fn active_view(&self) -> Option<&View> {
        self.active_view_id
            .as_ref()
            .and_then(|id| self.view(id))
            .or_else(|| self.views.first())
    }

    /// Switch the active view. Unknown ids are a no-op and return `false`.
    pub fn set_active_view(&mut self, id: &ViewId) -> bool {
        if self.view(id).is_none() {
            return false;
        }
        self.active_view_id = Some(id.clone());
        true
    }

    /// Append a view. The active view does not change.
    pub fn add_view(&mut self, name: impl Into<String>, kind: ViewKind) -> ViewId {
        let view = View::new(ViewId::generate(), name, kind);
        let id = view.id.clone();
        self.views.push(view);
        id
    }

    /// Remove a view. Deleting the active view activates the first remaining
    /// one, or leaves no active view when none remain.
    pub fn delete_view(&mut self, id: &ViewId) -> Result<View> {
        let index = self
            .views
            .iter()
            .position(|v| &v.id == id)
            .ok_or_else(|| Error::ViewNotFound(id.clone()))?;
        let removed = self.views.remove(index);

        if self.active_view_id.as_ref() == Some(id) {
            self.active_view_id = self.views.first().map(|v| v.id.clone());
        }
        Ok(removed)
    }
}
