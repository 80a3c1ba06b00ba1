use super::HandlerContext;
use crate::output;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tabula_engine::{project, Projection};
use tabula_types::{Error, View, ViewId};

#[derive(Serialize)]
struct ShowOutput<'a> {
    database: &'a str,
    view: Option<&'a View>,
    projection: &'a Projection<'a>,
}

pub fn handle(ctx: &HandlerContext, file: &Path, view_id: Option<String>) -> Result<()> {
    let database = ctx.load(file)?;

    let view = match view_id {
        Some(id) => {
            let id = ViewId::new(id);
            Some(database.view(&id).ok_or(Error::ViewNotFound(id.clone()))?)
        }
        None => database.active_view(),
    };

    let projection = match view {
        Some(view) => project(&database.items, &database.properties, view),
        None => Projection::NoView,
    };

    let out = ShowOutput {
        database: &database.title,
        view,
        projection: &projection,
    };
    ctx.render(&out, |painter| {
        output::render_projection(
            &database,
            view,
            &projection,
            ctx.config.display.max_column_width,
            painter,
        )
    })
}
