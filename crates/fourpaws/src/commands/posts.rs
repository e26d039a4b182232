//! Post command handlers.

use tabled::Tabled;

use fourpaws_core::{CommunityId, NewPost, Platform, Post, PostId};

use crate::cli::{GlobalOpts, PostOrder, PostsArgs, PostsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Community")]
    community: String,
    #[tabled(rename = "Likes")]
    likes: String,
    #[tabled(rename = "Comments")]
    comments: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Post> for PostRow {
    fn from(p: &Post) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            author: p
                .author
                .as_ref()
                .map(|a| a.username.clone())
                .unwrap_or_else(|| "-".into()),
            community: p
                .community_id
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".into()),
            likes: p.like_count.to_string(),
            comments: p.comment_count.to_string(),
            created: util::timestamp(p.created_at.as_ref()),
        }
    }
}

fn detail(p: &Post) -> String {
    let mut lines = vec![
        format!("ID:        {}", p.id),
        format!("Title:     {}", p.title),
        format!(
            "Author:    {}",
            p.author
                .as_ref()
                .map(|a| a.username.clone())
                .unwrap_or_else(|| "-".into())
        ),
        format!(
            "Community: {}",
            p.community_id
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".into())
        ),
        format!("Created:   {}", util::timestamp(p.created_at.as_ref())),
        format!("Likes:     {}", p.like_count),
        format!("Comments:  {}", p.comment_count),
    ];
    if let Some(ref image) = p.image_url {
        lines.push(format!("Image:     {image}"));
    }
    if !p.content.is_empty() {
        lines.push(String::new());
        lines.push(p.content.clone());
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    platform: &Platform,
    args: PostsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PostsCommand::List { community, order } => {
            let out = match (community, order) {
                (Some(community), Some(order)) => {
                    let id = CommunityId::new(community);
                    let list = match order {
                        PostOrder::Recent => platform.posts().recent_by_community(id).await?,
                        PostOrder::Popular => platform.posts().popular_by_community(id).await?,
                    };
                    output::render_list(&global.output, &list, PostRow::from, |p| {
                        p.id.to_string()
                    })
                }
                (Some(community), None) => {
                    let list = platform
                        .posts()
                        .by_community(CommunityId::new(community))
                        .await?;
                    output::render_list(&global.output, &list, PostRow::from, |p| {
                        p.id.to_string()
                    })
                }
                // clap enforces that --order comes with --community
                (None, _) => {
                    let snap = platform.posts().posts().await?;
                    output::render_list(
                        &global.output,
                        &snap,
                        |p| PostRow::from(p.as_ref()),
                        |p| p.id.to_string(),
                    )
                }
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PostsCommand::Get { id } => {
            let post = platform.posts().post(PostId::new(id)).await?;
            let out = output::render_single(&global.output, &post, detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PostsCommand::Create {
            title,
            content,
            community,
            image,
        } => {
            let image = image.as_deref().map(util::read_image).transpose()?;
            let created = platform
                .posts()
                .create(NewPost {
                    title,
                    content,
                    community: CommunityId::new(community),
                    image,
                })
                .await?;
            output::status(
                &format!("Post created with id {}", created.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        PostsCommand::Like { id } => {
            let post = platform.posts().like(PostId::new(id)).await?;
            output::status(
                &format!("Liked ({} likes now)", post.like_count),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        PostsCommand::Unlike { id } => {
            let post = platform.posts().unlike(PostId::new(id)).await?;
            output::status(
                &format!("Like removed ({} likes now)", post.like_count),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        PostsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete post {id}?"), global.yes)? {
                return Ok(());
            }
            platform.posts().remove(PostId::new(id)).await?;
            output::status("Post deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}
