// SPDX-License-Identifier: MPL-2.0
use abx_tester::app::{Bootstrap, Capabilities, Message, Mount, MountPoint, Root};
use abx_tester::backend::DatabaseClient;
use abx_tester::error::Result;
use abx_tester::i18n::Args;
use abx_tester::preferences::{FileStore, PreferenceStore, LOCALE_KEY};
use abx_tester::ui::home::HomeRoot;
use tempfile::tempdir;

const ENDPOINT: &str = "https://abx-default-rtdb.firebaseio.com";

struct Mounted {
    target: MountPoint,
    root: Box<dyn Root>,
    capabilities: Capabilities,
}

struct CaptureMount;

impl Mount for CaptureMount {
    type Output = Mounted;

    fn mount(
        self,
        target: &MountPoint,
        root: Box<dyn Root>,
        capabilities: Capabilities,
    ) -> Result<Mounted> {
        Ok(Mounted {
            target: target.clone(),
            root,
            capabilities,
        })
    }
}

fn boot(store: FileStore) -> Mounted {
    let database = DatabaseClient::new(ENDPOINT).expect("valid endpoint");
    Bootstrap::new(store, database)
        .run(|| Box::new(HomeRoot), CaptureMount)
        .expect("bootstrap should succeed")
}

#[test]
fn first_start_uses_english_and_mounts_on_app() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let (store, _) = FileStore::load_with_override(Some(dir.path().to_path_buf()));

    let mounted = boot(store);

    assert_eq!(mounted.target.selector(), "#app");
    assert_eq!(mounted.capabilities.i18n().current_locale(), "en");
    let args = Args::new().with("score", 7).with("maxTrial", 10);
    assert_eq!(
        mounted.capabilities.i18n().tr_with("score", &args),
        "You got 7 correct out of 10"
    );
}

#[test]
fn language_change_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");

    // First run: pick Indonesian.
    let (store, _) = FileStore::load_with_override(Some(dir.path().to_path_buf()));
    let mut first = boot(store);
    let _ = first.root.update(
        &mut first.capabilities,
        Message::LanguageSelected("id".into()),
    );
    assert_eq!(first.capabilities.i18n().tr("finish"), "Selesai");

    // Second run reads the persisted preference.
    let (store, warning) = FileStore::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(store.get(LOCALE_KEY).as_deref(), Some("id"));

    let second = boot(store);
    assert_eq!(second.capabilities.i18n().current_locale(), "id");
    assert!(second
        .root
        .title(&second.capabilities)
        .contains("Uji telinga Anda"));

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn database_binding_is_shared_by_every_reference() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let (store, _) = FileStore::load_with_override(Some(dir.path().to_path_buf()));
    let mounted = boot(store);

    let database = mounted.capabilities.database();
    let settings = database.reference("settings").expect("valid path");
    let trials = settings.child("trials").expect("valid path");

    assert_eq!(
        trials.rest_url().expect("url").as_str(),
        "https://abx-default-rtdb.firebaseio.com/settings/trials.json"
    );
}
