//! Engine-level tests against an in-memory gateway and a scripted shell.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use nestlist::engine::{Engine, Outcome};
use nestlist::gateway::{Gateway, GatewayError, RemoteList, RemoteSubtask, RemoteTask};
use nestlist::models::OpenMenu;
use nestlist::shell::Shell;
use nestlist::sort::SortKey;

/// In-memory gateway with per-operation failure injection and call
/// recording.
#[derive(Default)]
struct MockGateway {
    counter: Mutex<i64>,
    lists: Mutex<Vec<RemoteList>>,
    tasks: Mutex<HashMap<String, Vec<RemoteTask>>>,
    subtasks: Mutex<HashMap<String, Vec<RemoteSubtask>>>,
    fail: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl MockGateway {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        format!("{prefix}{counter}")
    }

    /// Make every call to `op` fail. `op` may be suffixed with `:<id>` to
    /// target one entity (e.g. `get_subtasks:t2`).
    fn fail_on(&self, op: &str) {
        self.fail.lock().unwrap().insert(op.to_string());
    }

    fn check(&self, op: &str, entity: Option<&str>) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(match entity {
            Some(id) => format!("{op}:{id}"),
            None => op.to_string(),
        });
        let fail = self.fail.lock().unwrap();
        let rejected = fail.contains(op)
            || entity.is_some_and(|id| fail.contains(&format!("{op}:{id}")));
        if rejected {
            Err(GatewayError::Api("injected failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    // Seeding for bootstrap tests

    fn seed_list(&self, id: &str, title: &str) {
        self.lists.lock().unwrap().push(RemoteList {
            id: id.to_string(),
            title: title.to_string(),
        });
        self.tasks.lock().unwrap().entry(id.to_string()).or_default();
    }

    fn seed_task(&self, list_id: &str, id: &str, name: Option<&str>, created_secs: i64) {
        self.tasks
            .lock()
            .unwrap()
            .entry(list_id.to_string())
            .or_default()
            .push(RemoteTask {
                id: id.to_string(),
                task_name: name.map(str::to_string),
                completed: false,
                created_at: Utc.timestamp_opt(created_secs, 0).unwrap(),
            });
        self.subtasks.lock().unwrap().entry(id.to_string()).or_default();
    }

    fn seed_subtask(&self, task_id: &str, id: &str, name: &str) {
        self.subtasks
            .lock()
            .unwrap()
            .entry(task_id.to_string())
            .or_default()
            .push(RemoteSubtask {
                id: id.to_string(),
                subtask_name: Some(name.to_string()),
                completed: false,
            });
    }
}

#[async_trait::async_trait]
impl Gateway for MockGateway {
    async fn create_list(&self, title: &str) -> Result<RemoteList, GatewayError> {
        self.check("create_list", Some(title))?;
        let list = RemoteList {
            id: self.next_id("l"),
            title: title.to_string(),
        };
        self.lists.lock().unwrap().push(list.clone());
        Ok(list)
    }

    async fn update_list(&self, id: &str, title: &str) -> Result<RemoteList, GatewayError> {
        self.check("update_list", Some(id))?;
        let mut lists = self.lists.lock().unwrap();
        let list = lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| GatewayError::Api("no such list".to_string()))?;
        list.title = title.to_string();
        Ok(list.clone())
    }

    async fn delete_list(&self, id: &str) -> Result<(), GatewayError> {
        self.check("delete_list", Some(id))?;
        self.lists.lock().unwrap().retain(|l| l.id != id);
        self.tasks.lock().unwrap().remove(id);
        Ok(())
    }

    async fn create_task(&self, list_id: &str, text: &str) -> Result<RemoteTask, GatewayError> {
        self.check("create_task", Some(text))?;
        let created_at = {
            let counter = self.counter.lock().unwrap();
            Utc.timestamp_opt(1_000 + *counter, 0).unwrap()
        };
        let task = RemoteTask {
            id: self.next_id("t"),
            task_name: Some(text.to_string()),
            completed: false,
            created_at,
        };
        self.tasks
            .lock()
            .unwrap()
            .entry(list_id.to_string())
            .or_default()
            .push(task.clone());
        Ok(task)
    }

    async fn toggle_task_completion(&self, task_id: &str) -> Result<RemoteTask, GatewayError> {
        self.check("toggle_task", Some(task_id))?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .values_mut()
            .flatten()
            .find(|t| t.id == task_id)
            .ok_or_else(|| GatewayError::Api("no such task".to_string()))?;
        task.completed = !task.completed;
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), GatewayError> {
        self.check("delete_task", Some(task_id))?;
        for tasks in self.tasks.lock().unwrap().values_mut() {
            tasks.retain(|t| t.id != task_id);
        }
        Ok(())
    }

    async fn create_subtask(
        &self,
        task_id: &str,
        text: &str,
    ) -> Result<RemoteSubtask, GatewayError> {
        self.check("create_subtask", Some(text))?;
        let subtask = RemoteSubtask {
            id: self.next_id("s"),
            subtask_name: Some(text.to_string()),
            completed: false,
        };
        self.subtasks
            .lock()
            .unwrap()
            .entry(task_id.to_string())
            .or_default()
            .push(subtask.clone());
        Ok(subtask)
    }

    async fn toggle_subtask_completion(
        &self,
        subtask_id: &str,
    ) -> Result<RemoteSubtask, GatewayError> {
        self.check("toggle_subtask", Some(subtask_id))?;
        let mut subtasks = self.subtasks.lock().unwrap();
        let subtask = subtasks
            .values_mut()
            .flatten()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| GatewayError::Api("no such subtask".to_string()))?;
        subtask.completed = !subtask.completed;
        Ok(subtask.clone())
    }

    async fn delete_subtask(&self, subtask_id: &str) -> Result<(), GatewayError> {
        self.check("delete_subtask", Some(subtask_id))?;
        for subtasks in self.subtasks.lock().unwrap().values_mut() {
            subtasks.retain(|s| s.id != subtask_id);
        }
        Ok(())
    }

    async fn get_all_lists(&self) -> Result<Vec<RemoteList>, GatewayError> {
        self.check("get_all_lists", None)?;
        Ok(self.lists.lock().unwrap().clone())
    }

    async fn get_tasks_by_list(&self, list_id: &str) -> Result<Vec<RemoteTask>, GatewayError> {
        self.check("get_tasks", Some(list_id))?;
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .get(list_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_subtasks_by_task(
        &self,
        task_id: &str,
    ) -> Result<Vec<RemoteSubtask>, GatewayError> {
        self.check("get_subtasks", Some(task_id))?;
        Ok(self
            .subtasks
            .lock()
            .unwrap()
            .get(task_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Shell with queued prompt/confirm answers and recorded notices.
#[derive(Default)]
struct ScriptedShell {
    prompts: Mutex<VecDeque<Option<String>>>,
    confirms: Mutex<VecDeque<bool>>,
    notices: Mutex<Vec<String>>,
}

impl ScriptedShell {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn queue_prompt(&self, answer: Option<&str>) {
        self.prompts
            .lock()
            .unwrap()
            .push_back(answer.map(str::to_string));
    }

    fn queue_confirm(&self, answer: bool) {
        self.confirms.lock().unwrap().push_back(answer);
    }

    fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Shell for ScriptedShell {
    fn prompt(&self, _message: &str, _initial: Option<&str>) -> Option<String> {
        self.prompts.lock().unwrap().pop_front().flatten()
    }

    fn confirm(&self, _message: &str) -> bool {
        self.confirms.lock().unwrap().pop_front().unwrap_or(false)
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

fn engine_with(gateway: &Arc<MockGateway>, shell: &Arc<ScriptedShell>) -> Engine {
    Engine::new(gateway.clone(), shell.clone())
}

fn assert_counts_match(store: &nestlist::store::Store) {
    for list in store.lists() {
        let tree = store.tree(&list.id).expect("tree exists for list");
        assert_eq!(list.count, tree.tasks.len(), "count drifted for {}", list.id);
    }
}

#[tokio::test]
async fn test_create_list_applies_confirmed_state() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("  Groceries  "));
    assert_eq!(engine.create_list().await, Outcome::Applied);

    let store = engine.snapshot();
    assert_eq!(store.lists().len(), 1);
    assert_eq!(store.trees().len(), 1);
    let list = &store.lists()[0];
    assert_eq!(list.title, "Groceries");
    assert_eq!(list.count, 0);
    assert!(list.visible);
    // The list and its tree share an id.
    assert_eq!(store.trees()[0].id, list.id);
    // The prompt was trimmed before it went over the wire.
    assert_eq!(gateway.calls(), vec!["create_list:Groceries"]);
}

#[tokio::test]
async fn test_create_list_empty_input_is_silent_noop() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("   "));
    assert_eq!(engine.create_list().await, Outcome::Aborted);

    shell.queue_prompt(None); // cancelled
    assert_eq!(engine.create_list().await, Outcome::Aborted);

    let store = engine.snapshot();
    assert!(store.lists().is_empty());
    assert!(store.trees().is_empty());
    assert!(gateway.calls().is_empty(), "no gateway call may be issued");
    assert!(shell.notices().is_empty(), "aborts are not failures");
}

#[tokio::test]
async fn test_create_list_remote_failure_leaves_store_unchanged() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);
    gateway.fail_on("create_list");

    shell.queue_prompt(Some("Groceries"));
    assert_eq!(engine.create_list().await, Outcome::Failed);

    assert!(engine.snapshot().lists().is_empty());
    assert_eq!(
        shell.notices(),
        vec!["Failed to create list. Please try again."]
    );
}

#[tokio::test]
async fn test_rename_list_uses_server_title() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Groceries"));
    engine.create_list().await;
    let list_id = engine.snapshot().lists()[0].id.clone();

    shell.queue_prompt(Some("  Errands "));
    assert_eq!(engine.rename_list(&list_id).await, Outcome::Applied);

    let store = engine.snapshot();
    assert_eq!(store.list(&list_id).unwrap().title, "Errands");
    assert_eq!(store.tree(&list_id).unwrap().title, "Errands");
}

#[tokio::test]
async fn test_delete_list_declined_confirmation_aborts() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Groceries"));
    engine.create_list().await;
    let list_id = engine.snapshot().lists()[0].id.clone();
    let calls_before = gateway.calls().len();

    shell.queue_confirm(false);
    assert_eq!(engine.delete_list(&list_id).await, Outcome::Aborted);

    assert_eq!(engine.snapshot().lists().len(), 1);
    assert_eq!(gateway.calls().len(), calls_before, "declining issues no call");
    assert!(shell.notices().is_empty());
}

#[tokio::test]
async fn test_delete_list_cascades_locally() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Groceries"));
    engine.create_list().await;
    let list_id = engine.snapshot().lists()[0].id.clone();
    shell.queue_prompt(Some("Milk"));
    engine.add_task(&list_id).await;

    shell.queue_confirm(true);
    assert_eq!(engine.delete_list(&list_id).await, Outcome::Applied);

    let store = engine.snapshot();
    assert!(store.lists().is_empty());
    assert!(store.trees().is_empty());
}

#[tokio::test]
async fn test_count_invariant_across_add_delete_move() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Work"));
    engine.create_list().await;
    shell.queue_prompt(Some("Home"));
    engine.create_list().await;
    let store = engine.snapshot();
    let work = store.lists()[0].id.clone();
    let home = store.lists()[1].id.clone();

    shell.queue_prompt(Some("Report"));
    engine.add_task(&work).await;
    shell.queue_prompt(Some("Email"));
    engine.add_task(&work).await;
    assert_eq!(engine.snapshot().list(&work).unwrap().count, 2);
    assert_counts_match(&engine.snapshot());

    let task_id = engine.snapshot().tree(&work).unwrap().tasks[0].id.clone();
    assert_eq!(engine.move_task(&work, &task_id, &home), Outcome::Applied);
    let store = engine.snapshot();
    assert_eq!(store.list(&work).unwrap().count, 1);
    assert_eq!(store.list(&home).unwrap().count, 1);
    assert_counts_match(&store);

    let remaining = engine.snapshot().tree(&work).unwrap().tasks[0].id.clone();
    shell.queue_confirm(true);
    engine.delete_task(&work, &remaining).await;
    let store = engine.snapshot();
    assert_eq!(store.list(&work).unwrap().count, 0);
    assert_counts_match(&store);
}

#[tokio::test]
async fn test_move_task_to_own_list_is_noop() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Work"));
    engine.create_list().await;
    let list_id = engine.snapshot().lists()[0].id.clone();
    shell.queue_prompt(Some("Report"));
    engine.add_task(&list_id).await;
    let task_id = engine.snapshot().tree(&list_id).unwrap().tasks[0].id.clone();

    let before = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(engine.move_task(&list_id, &task_id, &list_id), Outcome::Aborted);
    let after = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_toggle_task_adopts_server_state() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Work"));
    engine.create_list().await;
    let list_id = engine.snapshot().lists()[0].id.clone();
    shell.queue_prompt(Some("Report"));
    engine.add_task(&list_id).await;
    let task_id = engine.snapshot().tree(&list_id).unwrap().tasks[0].id.clone();

    assert_eq!(engine.toggle_task(&list_id, &task_id).await, Outcome::Applied);
    assert!(engine.snapshot().tree(&list_id).unwrap().task(&task_id).unwrap().completed);

    assert_eq!(engine.toggle_task(&list_id, &task_id).await, Outcome::Applied);
    assert!(!engine.snapshot().tree(&list_id).unwrap().task(&task_id).unwrap().completed);
}

#[tokio::test]
async fn test_delete_task_remote_failure_keeps_task_and_count() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Work"));
    engine.create_list().await;
    let list_id = engine.snapshot().lists()[0].id.clone();
    shell.queue_prompt(Some("Report"));
    engine.add_task(&list_id).await;
    let task_id = engine.snapshot().tree(&list_id).unwrap().tasks[0].id.clone();

    gateway.fail_on("delete_task");
    shell.queue_confirm(true);
    assert_eq!(engine.delete_task(&list_id, &task_id).await, Outcome::Failed);

    let store = engine.snapshot();
    assert!(store.tree(&list_id).unwrap().task(&task_id).is_some());
    assert_eq!(store.list(&list_id).unwrap().count, 1);
    assert_eq!(shell.notices(), vec!["Failed to delete task"]);
}

#[tokio::test]
async fn test_add_task_reapplies_active_sort() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Work"));
    engine.create_list().await;
    let list_id = engine.snapshot().lists()[0].id.clone();

    shell.queue_prompt(Some("Banana"));
    engine.add_task(&list_id).await;
    shell.queue_prompt(Some("Cherry"));
    engine.add_task(&list_id).await;
    assert!(engine.sort_tasks(&list_id, SortKey::Alphabetical));

    shell.queue_prompt(Some("Apple"));
    engine.add_task(&list_id).await;

    let texts: Vec<String> = engine
        .snapshot()
        .tree(&list_id)
        .unwrap()
        .tasks
        .iter()
        .map(|t| t.text.clone())
        .collect();
    assert_eq!(texts, vec!["Apple", "Banana", "Cherry"]);
}

#[tokio::test]
async fn test_subtask_lifecycle_through_engine() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Work"));
    engine.create_list().await;
    let list_id = engine.snapshot().lists()[0].id.clone();
    shell.queue_prompt(Some("Report"));
    engine.add_task(&list_id).await;
    let task_id = engine.snapshot().tree(&list_id).unwrap().tasks[0].id.clone();

    shell.queue_prompt(Some("  Outline "));
    assert_eq!(engine.add_subtask(&list_id, &task_id).await, Outcome::Applied);
    let sub_id = {
        let store = engine.snapshot();
        let subtasks = &store.tree(&list_id).unwrap().task(&task_id).unwrap().subtasks;
        assert_eq!(subtasks.len(), 1);
        assert_eq!(subtasks[0].text, "Outline");
        subtasks[0].id.clone()
    };

    assert_eq!(
        engine.toggle_subtask(&list_id, &task_id, &sub_id).await,
        Outcome::Applied
    );
    assert!(
        engine
            .snapshot()
            .tree(&list_id)
            .unwrap()
            .task(&task_id)
            .unwrap()
            .subtask(&sub_id)
            .unwrap()
            .completed
    );

    assert_eq!(
        engine.delete_subtask(&list_id, &task_id, &sub_id).await,
        Outcome::Applied
    );
    assert!(
        engine
            .snapshot()
            .tree(&list_id)
            .unwrap()
            .task(&task_id)
            .unwrap()
            .subtasks
            .is_empty()
    );
}

#[tokio::test]
async fn test_menu_exclusivity_through_engine() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);

    shell.queue_prompt(Some("Work"));
    engine.create_list().await;
    shell.queue_prompt(Some("Home"));
    engine.create_list().await;
    let store = engine.snapshot();
    let work = store.lists()[0].id.clone();
    let home = store.lists()[1].id.clone();
    shell.queue_prompt(Some("Report"));
    engine.add_task(&work).await;
    let task_id = engine.snapshot().tree(&work).unwrap().tasks[0].id.clone();

    engine.toggle_list_menu(&work);
    assert!(engine.snapshot().open_menu().is_list(&work));

    engine.toggle_list_menu(&home);
    assert!(engine.snapshot().open_menu().is_list(&home));

    engine.toggle_task_menu(&work, &task_id);
    assert!(engine.snapshot().open_menu().is_task(&work, &task_id));

    engine.close_all_menus();
    assert_eq!(engine.snapshot().open_menu(), &OpenMenu::None);
}

#[tokio::test]
async fn test_bootstrap_loads_three_tiers() {
    let gateway = MockGateway::new();
    gateway.seed_list("l1", "Work");
    gateway.seed_list("l2", "Home");
    gateway.seed_task("l1", "t1", Some("Report"), 10);
    gateway.seed_task("l1", "t2", Some("Email"), 20);
    gateway.seed_task("l2", "t3", Some("Dishes"), 30);
    gateway.seed_subtask("t1", "s1", "Outline");
    gateway.seed_subtask("t1", "s2", "Draft");

    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);
    engine.load().await;

    let store = engine.snapshot();
    assert!(!store.loading());
    assert_eq!(store.lists().len(), 2);
    assert_eq!(store.list("l1").unwrap().count, 2);
    assert_eq!(store.list("l2").unwrap().count, 1);
    assert_counts_match(&store);

    let t1 = store.tree("l1").unwrap().task("t1").unwrap();
    assert_eq!(t1.text, "Report");
    assert_eq!(t1.subtasks.len(), 2);
    assert_eq!(t1.subtasks[0].text, "Outline");
}

#[tokio::test]
async fn test_bootstrap_substitutes_placeholder_names() {
    let gateway = MockGateway::new();
    gateway.seed_list("l1", "Work");
    gateway.seed_task("l1", "t1", None, 10);

    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);
    engine.load().await;

    let store = engine.snapshot();
    assert_eq!(store.tree("l1").unwrap().task("t1").unwrap().text, "Untitled Task");
}

#[tokio::test]
async fn test_bootstrap_degrades_on_subtask_failure() {
    let gateway = MockGateway::new();
    gateway.seed_list("l1", "Work");
    gateway.seed_task("l1", "t1", Some("Report"), 10);
    gateway.seed_task("l1", "t2", Some("Email"), 20);
    gateway.seed_subtask("t1", "s1", "Outline");
    gateway.seed_subtask("t2", "s2", "Reply");
    gateway.fail_on("get_subtasks:t2");

    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);
    engine.load().await;

    let store = engine.snapshot();
    let tree = store.tree("l1").unwrap();
    assert_eq!(tree.task("t1").unwrap().subtasks.len(), 1, "sibling keeps its subtasks");
    assert!(tree.task("t2").unwrap().subtasks.is_empty(), "failed fetch degrades to empty");
    assert!(shell.notices().is_empty(), "degraded load is silent");
}

#[tokio::test]
async fn test_bootstrap_degrades_on_task_failure() {
    let gateway = MockGateway::new();
    gateway.seed_list("l1", "Work");
    gateway.seed_list("l2", "Home");
    gateway.seed_task("l1", "t1", Some("Report"), 10);
    gateway.seed_task("l2", "t2", Some("Dishes"), 20);
    gateway.fail_on("get_tasks:l1");

    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);
    engine.load().await;

    let store = engine.snapshot();
    assert!(store.tree("l1").unwrap().tasks.is_empty());
    assert_eq!(store.list("l1").unwrap().count, 0);
    assert_eq!(store.tree("l2").unwrap().tasks.len(), 1);
    assert_counts_match(&store);
}

#[tokio::test]
async fn test_bootstrap_list_failure_leaves_store_empty() {
    let gateway = MockGateway::new();
    gateway.seed_list("l1", "Work");
    gateway.fail_on("get_all_lists");

    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);
    engine.load().await;

    let store = engine.snapshot();
    assert!(store.lists().is_empty());
    assert!(store.trees().is_empty());
    assert!(!store.loading());
    assert!(shell.notices().is_empty(), "list-tier failure is recoverable, not an error");
}

#[tokio::test]
async fn test_update_broadcast_fires_on_mutation() {
    let gateway = MockGateway::new();
    let shell = ScriptedShell::new();
    let engine = engine_with(&gateway, &shell);
    let mut rx = engine.subscribe();

    shell.queue_prompt(Some("Work"));
    engine.create_list().await;

    assert!(rx.try_recv().is_ok(), "mutations notify subscribers");
}
