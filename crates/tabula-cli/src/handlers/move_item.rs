use super::HandlerContext;
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::path::Path;
use tabula_engine::{move_to_column, resolve_group_property};
use tabula_types::{ItemId, PropertyId};

#[derive(Serialize)]
struct MoveOutput<'a> {
    item_id: &'a ItemId,
    property_id: &'a PropertyId,
    label: &'a str,
}

pub fn handle(
    ctx: &HandlerContext,
    file: &Path,
    item: String,
    to: String,
    property: Option<String>,
) -> Result<()> {
    let mut database = ctx.load(file)?;
    let item_id = ItemId::new(item);

    let property_id = match property {
        Some(id) => PropertyId::new(id),
        None => {
            let view = database
                .active_view()
                .ok_or_else(|| anyhow!("database has no views; pass --property"))?;
            resolve_group_property(view, &database.properties)
                .map(|p| p.id.clone())
                .ok_or_else(|| {
                    anyhow!(
                        "view '{}' has no select property to group by; pass --property",
                        view.name
                    )
                })?
        }
    };

    move_to_column(&mut database, &item_id, &property_id, &to)?;
    ctx.save(&database, file)?;

    let out = MoveOutput {
        item_id: &item_id,
        property_id: &property_id,
        label: &to,
    };
    ctx.render(&out, |painter| {
        format!(
            "Moved {} to {} ({})",
            item_id,
            painter.bold(&to),
            property_id
        )
    })
}
