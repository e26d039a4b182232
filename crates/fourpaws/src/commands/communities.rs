//! Community command handlers.

use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use fourpaws_core::{Community, CommunityDetail, CommunityId, NewCommunity, Platform};

use crate::cli::{CommunitiesArgs, CommunitiesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CommunityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Members")]
    members: String,
    #[tabled(rename = "Posts")]
    posts: String,
}

impl From<&Community> for CommunityRow {
    fn from(c: &Community) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            category: c.category.clone(),
            members: c.member_count.to_string(),
            posts: c.post_ids.len().to_string(),
        }
    }
}

fn community_lines(c: &Community) -> Vec<String> {
    let mut lines = vec![
        format!("ID:          {}", c.id),
        format!("Name:        {}", c.name),
        format!("Category:    {}", c.category),
        format!("Members:     {}", c.member_count),
        format!("Followers:   {}", c.follower_ids.len()),
        format!("Posts:       {}", c.post_ids.len()),
    ];
    if let Some(ref image) = c.image_url {
        lines.push(format!("Image:       {image}"));
    }
    if !c.description.is_empty() {
        lines.push(format!("Description: {}", c.description));
    }
    lines
}

/// Community header plus its posts, one line each.
fn detail(view: &CommunityDetail) -> String {
    let mut lines = community_lines(&view.community);
    if !view.posts.is_empty() {
        lines.push(String::new());
        for post in &view.posts {
            lines.push(format!(
                "  [{}] {}  ({} likes, {} comments, {})",
                post.id,
                post.title,
                post.like_count,
                post.comment_count,
                util::timestamp(post.created_at.as_ref()),
            ));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    platform: &Platform,
    args: CommunitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CommunitiesCommand::List { category, search } => {
            let out = if let Some(category) = category {
                let list = platform.communities().by_category(&category).await?;
                output::render_list(&global.output, &list, CommunityRow::from, |c| {
                    c.id.to_string()
                })
            } else if let Some(search) = search {
                let list = platform.communities().search(&search).await?;
                output::render_list(&global.output, &list, CommunityRow::from, |c| {
                    c.id.to_string()
                })
            } else {
                let snap = platform.communities().communities().await?;
                output::render_list(
                    &global.output,
                    &snap,
                    |c| CommunityRow::from(c.as_ref()),
                    |c| c.id.to_string(),
                )
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CommunitiesCommand::Get { id, posts } => {
            // The token belongs to this one-shot command, so the load
            // only stops early on ctrl-c killing the process.
            let cancel = CancellationToken::new();
            let view = platform
                .community_detail(CommunityId::new(id), posts.into(), &cancel)
                .await?;

            let out = output::render_single(&global.output, &view, detail, |v| {
                v.community.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CommunitiesCommand::Create {
            name,
            description,
            category,
            image,
        } => {
            let image = image.as_deref().map(util::read_image).transpose()?;
            let created = platform
                .communities()
                .create(NewCommunity {
                    name,
                    description,
                    category,
                    image,
                })
                .await?;
            output::status(
                &format!("Community {} created with id {}", created.name, created.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        CommunitiesCommand::Follow { id } => {
            let community = platform.communities().follow(CommunityId::new(id)).await?;
            output::status(
                &format!(
                    "Following {} ({} members)",
                    community.name, community.member_count
                ),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        CommunitiesCommand::Unfollow { id } => {
            let community = platform
                .communities()
                .unfollow(CommunityId::new(id))
                .await?;
            output::status(
                &format!("Unfollowed {}", community.name),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}
