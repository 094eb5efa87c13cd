//! Replace a working-tree file with its version from another branch.

use super::CommandContext;
use super::error::{CommandError, Result};
use super::path_context::LocationRef;
use crate::infra::git::{GitRunner, list_branches};
use crate::shared::ui::{Notification, Ui, confirm};

pub async fn run<R: GitRunner, U: Ui>(
    ctx: &CommandContext<R, U>,
    reference: LocationRef,
    branch: Option<String>,
) -> Result<()> {
    let path = ctx.resolve(reference).await?;
    let file_name = path.file_name();

    let branch = match branch {
        Some(branch) => branch,
        None => {
            let branches = list_branches(&ctx.runner, &path.repo_root, ctx.remote()).await?;
            if branches.is_empty() {
                return Err(CommandError::NoBranches.into());
            }
            let title = format!("Checkout {file_name} from Branch");
            match ctx.ui.pick(&title, &branches)? {
                Some(branch) => branch,
                None => {
                    tracing::info!("User cancelled branch selection");
                    return Ok(());
                }
            }
        }
    };
    tracing::info!("Selected branch: {branch}");

    let object = format!("{branch}:{}", path.relative_path);
    if ctx
        .git(&path.repo_root, &["cat-file", "-e", &object])
        .await
        .is_err()
    {
        return Err(CommandError::BranchContentMissing {
            path: path.relative_path,
            branch,
        }
        .into());
    }

    let message = format!(
        "This will replace \"{file_name}\" with the version from branch \"{branch}\". Any local changes will be lost."
    );
    if !confirm(&ctx.ui, &message, "Checkout File", "Cancel")? {
        tracing::info!("User cancelled checkout confirmation");
        return Ok(());
    }

    ctx.git(
        &path.repo_root,
        &["checkout", &branch, "--", &path.relative_path],
    )
    .await?;

    if !path.absolute_path.exists() {
        return Err(CommandError::CheckoutFileMissing(path.absolute_path).into());
    }

    tracing::info!(
        "Successfully checked out {} from branch {branch}",
        path.relative_path
    );
    ctx.ui.notify(
        &Notification::info(format!("{file_name} updated from branch \"{branch}\""))
            .with_file(&path.absolute_path)
            .with_output(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, fake_root, toplevel};
    use crate::infra::git::RealGitRunner;
    use crate::shared::testing::{Prompt, RecordingUi, ScriptedRunner, TestRepo};
    use crate::shared::ui::NotificationAction;

    const FOR_EACH_REF: &[&str] = &[
        "for-each-ref",
        "--format=%(refname:short)",
        "refs/heads",
        "refs/remotes/origin",
    ];

    #[tokio::test]
    async fn missing_content_fails_before_confirmation() {
        let (_dir, root) = fake_root();
        let runner = toplevel(ScriptedRunner::new(), &root)
            .on(FOR_EACH_REF, "main\nfeature\norigin/main\n")
            .fail(&["cat-file", "-e", "feature:a.txt"], "fatal: path 'a.txt' does not exist");
        let ui = RecordingUi::new().pick_answer("feature");
        let ctx = context(runner, ui, &root);

        let err = run(&ctx, LocationRef::Path("a.txt".into()), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::BranchContentMissing { path, branch })
                if path == "a.txt" && branch == "feature"
        ));
        assert!(ctx.ui.dialogs().is_empty());
        assert!(!ctx.runner.was_called(&["checkout"]));
    }

    #[tokio::test]
    async fn branches_are_offered_sorted_and_merged() {
        let (_dir, root) = fake_root();
        let runner = toplevel(ScriptedRunner::new(), &root)
            .on(FOR_EACH_REF, "main\ndev\norigin/main\norigin/feature\n");
        let ctx = context(runner, RecordingUi::new(), &root);

        run(&ctx, LocationRef::Path("a.txt".into()), None)
            .await
            .unwrap();

        assert_eq!(
            ctx.ui.prompts(),
            vec![Prompt::Pick {
                title: "Checkout a.txt from Branch".to_string(),
                items: vec!["dev".into(), "feature".into(), "main".into()],
            }]
        );
        // dismissed pick: nothing else happens
        assert!(ctx.ui.notifications().is_empty());
        assert!(!ctx.runner.was_called(&["cat-file"]));
    }

    #[tokio::test]
    async fn no_branches_is_an_error() {
        let (_dir, root) = fake_root();
        let runner = toplevel(ScriptedRunner::new(), &root).on(FOR_EACH_REF, "");
        let ctx = context(runner, RecordingUi::new(), &root);

        let err = run(&ctx, LocationRef::Path("a.txt".into()), None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No branches found in this repository");
    }

    #[tokio::test]
    async fn declined_confirmation_leaves_file_alone() {
        let (_dir, root) = fake_root();
        let runner = toplevel(ScriptedRunner::new(), &root)
            .on(&["cat-file", "-e", "dev:a.txt"], "");
        let ui = RecordingUi::new().choose_answer(1);
        let ctx = context(runner, ui, &root);

        run(&ctx, LocationRef::Path("a.txt".into()), Some("dev".into()))
            .await
            .unwrap();

        assert_eq!(ctx.ui.dialogs().len(), 1);
        assert!(!ctx.runner.was_called(&["checkout"]));
        assert!(!ctx.runner.was_called(&["for-each-ref"]));
    }

    #[tokio::test]
    async fn file_missing_after_checkout_is_an_error() {
        let (_dir, root) = fake_root();
        let runner = toplevel(ScriptedRunner::new(), &root)
            .on(&["cat-file", "-e", "dev:a.txt"], "")
            .on(&["checkout", "dev", "--", "a.txt"], "");
        let ui = RecordingUi::new().choose_answer(0);
        let ctx = context(runner, ui, &root);

        let err = run(&ctx, LocationRef::Path("a.txt".into()), Some("dev".into()))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::CheckoutFileMissing(_))
        ));
    }

    #[tokio::test]
    async fn checkout_restores_branch_version() {
        let repo = TestRepo::new();
        repo.write_file("config.toml", "from main\n");
        repo.commit_all("add config");
        repo.git(&["branch", "stable"]);
        repo.write_file("config.toml", "local edits\n");

        let ui = RecordingUi::new().pick_answer("stable").choose_answer(0);
        let ctx = context(RealGitRunner, ui, &repo.path());

        run(&ctx, LocationRef::Path("config.toml".into()), None)
            .await
            .unwrap();

        let content = std::fs::read_to_string(repo.path().join("config.toml")).unwrap();
        assert_eq!(content, "from main\n");
        let n = ctx.ui.only_notification();
        assert_eq!(n.message(), "config.toml updated from branch \"stable\"");
        assert_eq!(
            n.actions(),
            &[
                NotificationAction::ShowFile(repo.path().join("config.toml")),
                NotificationAction::ShowOutput,
            ]
        );
    }
}
