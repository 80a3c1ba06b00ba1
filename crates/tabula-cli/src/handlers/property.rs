use super::{edit, HandlerContext};
use crate::args::PropertyCommand;
use anyhow::Result;
use log::warn;
use tabula_types::{PropertyId, PropertyType};

pub fn handle(ctx: &HandlerContext, command: PropertyCommand) -> Result<()> {
    match command {
        PropertyCommand::Add { file, name, kind } => edit(ctx, &file, |db| {
            let kind = PropertyType::from(kind);
            let id = db.add_property(name, kind)?;
            Ok(format!("Added {} property {}", kind, id))
        }),
        PropertyCommand::AddOption {
            file,
            property,
            label,
            color,
        } => edit(ctx, &file, |db| {
            let id = PropertyId::new(property);
            db.add_select_option(&id, label.as_str(), color)?;
            Ok(format!("Added option '{}' to {}", label, id))
        }),
        PropertyCommand::Rename {
            file,
            property,
            name,
        } => edit(ctx, &file, |db| {
            let id = PropertyId::new(property);
            db.rename_property(&id, name.as_str())?;
            Ok(format!("Renamed {} to '{}'", id, name))
        }),
        PropertyCommand::Hide { file, property } => edit(ctx, &file, |db| {
            let id = PropertyId::new(property);
            db.set_property_visibility(&id, false)?;
            Ok(format!("Property {} is hidden", id))
        }),
        PropertyCommand::Reveal { file, property } => edit(ctx, &file, |db| {
            let id = PropertyId::new(property);
            db.set_property_visibility(&id, true)?;
            Ok(format!("Property {} is visible", id))
        }),
        PropertyCommand::Delete { file, property } => edit(ctx, &file, |db| {
            let id = PropertyId::new(property);
            let removed = db.delete_property(&id)?;

            let referencing: Vec<String> = db
                .views
                .iter()
                .filter(|v| {
                    v.filters.iter().any(|f| f.property_id == id)
                        || v.sorts.iter().any(|s| s.property_id == id)
                        || v.group_by.as_ref() == Some(&id)
                })
                .map(|v| v.id.to_string())
                .collect();
            if !referencing.is_empty() {
                warn!(
                    "views still reference deleted property {}: {}",
                    id,
                    referencing.join(", ")
                );
            }

            Ok(format!("Deleted property '{}' ({})", removed.name, id))
        }),
    }
}
