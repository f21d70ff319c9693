use taskline_core::db::open_db_in_memory;
use taskline_core::{ListFilter, SqliteTaskRepository, Task, TaskDraft, TaskId, TaskRepository};

fn drafts(descriptions: &[&str]) -> Vec<TaskDraft> {
    descriptions
        .iter()
        .map(|description| TaskDraft::new(*description).unwrap())
        .collect()
}

fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(|task| task.id).collect()
}

#[test]
fn create_assigns_distinct_ids_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create(&drafts(&["Buy milk", "Walk dog"])).unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(created[0].description, "Buy milk");
    assert_eq!(created[1].description, "Walk dog");
    assert!(created[0].id < created[1].id);
    for task in &created {
        assert!(task.created_at > 0);
        assert!(task.completed_at.is_none());
        assert!(task.deleted_at.is_none());
    }
}

#[test]
fn create_with_no_drafts_inserts_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    assert!(repo.create(&[]).unwrap().is_empty());
    assert!(repo.get(&[], ListFilter::All).unwrap().is_empty());
}

#[test]
fn delete_marks_active_rows_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create(&drafts(&["Task 1", "Task 2", "Task 3"])).unwrap();
    let targets = &ids(&created)[..2];

    assert_eq!(repo.delete(targets).unwrap(), 2);
    assert_eq!(repo.delete(targets).unwrap(), 0, "second delete is a no-op");
}

#[test]
fn delete_nonexistent_id_returns_zero_affected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    assert_eq!(repo.delete(&[999]).unwrap(), 0);
}

#[test]
fn deleted_task_only_appears_under_removed_filter() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create(&drafts(&["keep", "drop"])).unwrap();
    let dropped = created[1].id;

    repo.delete(&[dropped]).unwrap();

    for filter in [ListFilter::All, ListFilter::Uncompleted, ListFilter::Completed] {
        let visible = repo.get(&[], filter).unwrap();
        assert!(
            visible.iter().all(|task| task.id != dropped),
            "deleted task leaked through {filter:?}"
        );
    }

    let removed = repo.get(&[], ListFilter::Removed).unwrap();
    assert_eq!(ids(&removed), vec![dropped]);
    assert!(removed[0].deleted_at.is_some());
}

#[test]
fn complete_is_idempotent_and_skips_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create(&drafts(&["Task A", "Task B"])).unwrap();
    let first = created[0].id;

    assert_eq!(repo.complete(&[first]).unwrap(), 1);
    assert_eq!(repo.complete(&[first]).unwrap(), 0, "already completed");
    assert_eq!(repo.complete(&[999]).unwrap(), 0, "missing id");

    // One of the two is already completed; only the other changes.
    assert_eq!(repo.complete(&ids(&created)).unwrap(), 1);
}

#[test]
fn complete_skips_soft_deleted_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create(&drafts(&["gone"])).unwrap();
    let id = created[0].id;

    repo.delete(&[id]).unwrap();

    assert_eq!(repo.complete(&[id]).unwrap(), 0);
}

#[test]
fn completing_then_deleting_keeps_completion_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create(&drafts(&["both"])).unwrap();
    let id = created[0].id;

    repo.complete(&[id]).unwrap();
    repo.delete(&[id]).unwrap();

    let row = &repo.get(&[id], ListFilter::Ids).unwrap()[0];
    assert!(row.completed_at.is_some(), "deletion must not clear completion");
    assert!(row.deleted_at.is_some());
}

#[test]
fn filters_partition_completed_and_uncompleted_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create(&drafts(&["Task X", "Task Y", "Task Z"])).unwrap();

    repo.complete(&[created[0].id]).unwrap();

    let all = repo.get(&[], ListFilter::All).unwrap();
    assert_eq!(all.len(), 3);

    let completed = repo.get(&[], ListFilter::Completed).unwrap();
    assert_eq!(ids(&completed), vec![created[0].id]);

    let uncompleted = repo.get(&[], ListFilter::Uncompleted).unwrap();
    assert_eq!(uncompleted.len(), 2);
    assert!(uncompleted
        .iter()
        .all(|task| task.completed_at.is_none() && task.deleted_at.is_none()));
}

#[test]
fn get_by_explicit_ids_ignores_filter_and_soft_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create(&drafts(&["a", "b", "c"])).unwrap();
    let (first, second) = (created[0].id, created[1].id);

    repo.delete(&[second]).unwrap();

    let selected = repo.get(&[second, first], ListFilter::Uncompleted).unwrap();
    assert_eq!(ids(&selected), vec![first, second], "ascending id order");
    assert!(selected[1].deleted_at.is_some(), "removed row still selectable");
}

#[test]
fn get_with_ids_filter_and_no_ids_selects_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.create(&drafts(&["present"])).unwrap();

    assert!(repo.get(&[], ListFilter::Ids).unwrap().is_empty());
}

#[test]
fn ids_of_deleted_tasks_are_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create(&drafts(&["first", "second"])).unwrap();
    let highest = created[1].id;

    repo.delete(&[highest]).unwrap();
    let next = repo.create(&drafts(&["third"])).unwrap();

    assert!(next[0].id > highest);
}
