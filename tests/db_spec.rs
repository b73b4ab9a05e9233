use chrono::NaiveDate;
use recall_planner::db::Database;
use recall_planner::error::Error;
use recall_planner::models::*;
use serde_json::json;
use speculate2::speculate;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn learn(db: &Database, on: &str, content: &str) -> LearningItem {
    db.create_learning(CreateLearningInput {
        date: on.to_string(),
        content: content.to_string(),
    })
    .expect("Failed to create learning item")
}

fn plan_json(id: &str, content: &str) -> serde_json::Value {
    json!({
        "id": id,
        "section": "morning",
        "content": content,
        "date": "2025-01-06",
    })
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = Database::open_dir(dir.path()).expect("Failed to open database");
    }

    describe "open" {
        it "creates both documents" {
            assert!(dir.path().join("learning_data.json").exists());
            assert!(dir.path().join("planning_data.json").exists());
        }

        it "reads items written by a previous instance" {
            let item = learn(&db, "2025-01-01", "Ownership");

            let reopened = Database::open_dir(dir.path()).expect("Failed to reopen");
            let items = reopened.get_all_learnings().expect("Query failed");
            assert_eq!(items, vec![item]);
        }

        it "reads legacy items without completion history" {
            std::fs::write(
                dir.path().join("learning_data.json"),
                r#"[{"id": "1", "date": "2025-01-01", "content": "Borrowing"}]"#,
            ).expect("Failed to write legacy file");

            let items = db.get_all_learnings().expect("Query failed");
            assert_eq!(items[0].id, "1");
            assert!(items[0].completed_dates.is_empty());
            assert!(items[0].recap_dates.is_empty());
            assert!(!items[0].completed);
        }
    }

    describe "learning items" {
        describe "create_learning" {
            it "computes five recap dates and empty history" {
                let item = learn(&db, "2025-01-01", "Lifetimes");

                let expected: Vec<NaiveDate> = [
                    "2025-01-02", "2025-01-04", "2025-01-08", "2025-01-16", "2025-01-31",
                ].iter().map(|s| date(s)).collect();
                assert_eq!(item.recap_dates, expected);
                assert!(item.completed_dates.is_empty());
                assert_eq!(item.content, "Lifetimes");
            }

            it "rejects a malformed date and stores nothing" {
                let result = db.create_learning(CreateLearningInput {
                    date: "2025/01/01".to_string(),
                    content: "Traits".to_string(),
                });

                assert!(matches!(result, Err(Error::Parse(_))));
                assert!(db.get_all_learnings().expect("Query failed").is_empty());
            }

            it "rejects a date with an extended year and stores nothing" {
                for bad in ["+262142-12-20", "+12025-01-01"] {
                    let result = db.create_learning(CreateLearningInput {
                        date: bad.to_string(),
                        content: "Overflow".to_string(),
                    });
                    assert!(matches!(result, Err(Error::Parse(_))));
                }

                assert!(db.get_all_learnings().expect("Query failed").is_empty());
            }

            it "never reuses an id after deletion" {
                let first = learn(&db, "2025-01-01", "A");
                let second = learn(&db, "2025-01-01", "B");
                db.delete_learning(&first.id).expect("Failed to delete");

                let third = learn(&db, "2025-01-01", "C");
                assert_ne!(third.id, first.id);
                assert_ne!(third.id, second.id);
            }
        }

        describe "toggle_completion" {
            it "adds a date once even when toggled twice" {
                let item = learn(&db, "2025-01-01", "Iterators");

                db.toggle_completion(&item.id, true, Some(date("2025-01-02"))).expect("Toggle failed");
                let item = db.toggle_completion(&item.id, true, Some(date("2025-01-02"))).expect("Toggle failed");

                assert_eq!(item.completed_dates, vec![date("2025-01-02")]);
            }

            it "restores the previous state when toggled on then off" {
                let item = learn(&db, "2025-01-01", "Closures");
                db.toggle_completion(&item.id, true, Some(date("2025-01-02"))).expect("Toggle failed");
                let before = db.get_learning(&item.id).expect("Query failed").unwrap().completed_dates;

                db.toggle_completion(&item.id, true, Some(date("2025-01-04"))).expect("Toggle failed");
                let after = db.toggle_completion(&item.id, false, Some(date("2025-01-04"))).expect("Toggle failed");

                assert_eq!(after.completed_dates, before);
            }

            it "sets the legacy flag when no date is given" {
                let item = learn(&db, "2025-01-01", "Macros");

                let item = db.toggle_completion(&item.id, true, None).expect("Toggle failed");

                assert!(item.completed);
                assert!(item.completed_dates.is_empty());
            }

            it "persists the change" {
                let item = learn(&db, "2025-01-01", "Pinning");
                db.toggle_completion(&item.id, true, Some(date("2025-01-08"))).expect("Toggle failed");

                let stored = db.get_learning(&item.id).expect("Query failed").unwrap();
                assert!(stored.is_completed_on(date("2025-01-08")));
            }

            it "fails with NotFound for an unknown id" {
                let result = db.toggle_completion("missing", true, Some(date("2025-01-02")));
                assert!(matches!(result, Err(Error::NotFound(_))));
            }
        }

        describe "update_learning_content" {
            it "replaces content and keeps the schedule" {
                let item = learn(&db, "2025-01-01", "Old");

                let updated = db.update_learning_content(&item.id, "New".to_string()).expect("Update failed");

                assert_eq!(updated.content, "New");
                assert_eq!(updated.recap_dates, item.recap_dates);
                assert_eq!(updated.date, item.date);
            }

            it "fails with NotFound for an unknown id" {
                let result = db.update_learning_content("missing", "x".to_string());
                assert!(matches!(result, Err(Error::NotFound(_))));
            }
        }

        describe "delete_learning" {
            it "removes only the matching item" {
                let keep = learn(&db, "2025-01-01", "Keep");
                let gone = learn(&db, "2025-01-01", "Drop");

                db.delete_learning(&gone.id).expect("Delete failed");

                assert_eq!(db.get_all_learnings().expect("Query failed"), vec![keep]);
            }

            it "fails with NotFound and leaves the store unchanged" {
                let item = learn(&db, "2025-01-01", "Stay");

                let result = db.delete_learning("missing");

                assert!(matches!(result, Err(Error::NotFound(_))));
                assert_eq!(db.get_all_learnings().expect("Query failed"), vec![item]);
            }
        }

        describe "get_due_learnings" {
            it "returns items with a recap on the date" {
                let item = learn(&db, "2025-01-01", "Async");
                learn(&db, "2025-01-03", "Send and Sync");

                let due = db.get_due_learnings(date("2025-01-08")).expect("Query failed");

                assert_eq!(due, vec![item]);
            }

            it "includes items already completed for the date" {
                let item = learn(&db, "2025-01-01", "Unsafe");
                db.toggle_completion(&item.id, true, Some(date("2025-01-08"))).expect("Toggle failed");

                let due = db.get_due_learnings(date("2025-01-08")).expect("Query failed");

                assert_eq!(due.len(), 1);
                assert!(due[0].is_completed_on(date("2025-01-08")));
            }

            it "returns an empty list when nothing is due" {
                learn(&db, "2025-01-01", "Generics");
                let due = db.get_due_learnings(date("2025-01-01")).expect("Query failed");
                assert!(due.is_empty());
            }
        }

        describe "get_recap_schedule" {
            it "groups items by day in date order" {
                learn(&db, "2025-01-01", "A");
                learn(&db, "2025-01-03", "B");

                let schedule = db.get_recap_schedule(date("2025-01-02"), 3).expect("Query failed");

                let days: Vec<NaiveDate> = schedule.iter().map(|d| d.date).collect();
                assert_eq!(days, vec![date("2025-01-02"), date("2025-01-04")]);
                assert_eq!(schedule[1].items.len(), 2);
            }

            it "rejects a window longer than a year" {
                learn(&db, "2025-01-01", "A");

                let result = db.get_recap_schedule(date("2025-01-01"), 20_000_000);

                assert!(matches!(result, Err(Error::Validation(_))));
            }
        }
    }

    describe "planning" {
        describe "add_planning_item" {
            it "appends to the selected collection only" {
                db.add_planning_item(PlanType::DailyPlans, plan_json("p1", "Write tests")).expect("Add failed");

                let data = db.get_planning_data().expect("Query failed");
                assert_eq!(data.daily_plans.len(), 1);
                assert!(data.weekly_plans.is_empty());
                assert_eq!(data.daily_plans[0].content, "Write tests");
            }

            it "rejects a payload of the wrong entity shape" {
                let result = db.add_planning_item(PlanType::TaskGroups, plan_json("p1", "Not a group"));

                assert!(matches!(result, Err(Error::Validation(_))));
                assert!(db.get_planning_data().expect("Query failed").task_groups.is_empty());
            }

            it "stores task groups" {
                let item = db.add_planning_item(PlanType::MonthlyTaskGroups, json!({
                    "id": "g1",
                    "taskName": "Learn Rust",
                    "planIds": ["p1", "p2"],
                    "createdAt": "2025-01-01T09:00:00Z",
                })).expect("Add failed");

                match item {
                    PlanningItem::TaskGroup(group) => assert_eq!(group.plan_ids.len(), 2),
                    other => panic!("expected a task group, got {:?}", other),
                }
            }
        }

        describe "update_planning_item" {
            it "merges only the supplied fields" {
                db.add_planning_item(PlanType::WeeklyPlans, plan_json("p1", "Draft")).expect("Add failed");

                db.update_planning_item(PlanType::WeeklyPlans, "p1", json!({ "completed": true })).expect("Update failed");

                let plan = &db.get_planning_data().expect("Query failed").weekly_plans[0];
                assert!(plan.completed);
                assert_eq!(plan.content, "Draft");
                assert_eq!(plan.section, "morning");
                assert_eq!(plan.date, "2025-01-06");
            }

            it "clears the group when groupId is null" {
                db.add_planning_item(PlanType::DailyPlans, json!({
                    "id": "p1",
                    "section": "morning",
                    "content": "Grouped",
                    "date": "2025-01-06",
                    "groupId": "g1",
                })).expect("Add failed");

                db.update_planning_item(PlanType::DailyPlans, "p1", json!({ "groupId": null })).expect("Update failed");

                let plan = &db.get_planning_data().expect("Query failed").daily_plans[0];
                assert_eq!(plan.group_id, None);
                assert_eq!(plan.content, "Grouped");
            }

            it "keeps the group when groupId is absent" {
                db.add_planning_item(PlanType::DailyPlans, json!({
                    "id": "p1",
                    "section": "morning",
                    "content": "Grouped",
                    "date": "2025-01-06",
                    "groupId": "g1",
                })).expect("Add failed");

                db.update_planning_item(PlanType::DailyPlans, "p1", json!({ "completed": true })).expect("Update failed");

                let plan = &db.get_planning_data().expect("Query failed").daily_plans[0];
                assert_eq!(plan.group_id.as_deref(), Some("g1"));
            }

            it "fails with NotFound for an unknown id" {
                let result = db.update_planning_item(PlanType::WeeklyPlans, "missing", json!({ "completed": true }));
                assert!(matches!(result, Err(Error::NotFound(_))));
            }
        }

        describe "delete_planning_item" {
            it "removes the matching item" {
                db.add_planning_item(PlanType::YearlyPlans, plan_json("p1", "One")).expect("Add failed");
                db.add_planning_item(PlanType::YearlyPlans, plan_json("p2", "Two")).expect("Add failed");

                db.delete_planning_item(PlanType::YearlyPlans, "p1").expect("Delete failed");

                let data = db.get_planning_data().expect("Query failed");
                assert_eq!(data.yearly_plans.len(), 1);
                assert_eq!(data.yearly_plans[0].id, "p2");
            }

            it "fails with NotFound and leaves the collection unchanged" {
                db.add_planning_item(PlanType::YearlyPlans, plan_json("p1", "One")).expect("Add failed");

                let result = db.delete_planning_item(PlanType::YearlyPlans, "missing");

                assert!(matches!(result, Err(Error::NotFound(_))));
                assert_eq!(db.get_planning_data().expect("Query failed").yearly_plans.len(), 1);
            }
        }

        describe "replace_planning_items" {
            it "overwrites one collection and returns the count" {
                db.add_planning_item(PlanType::MonthlyPlans, plan_json("old", "Old")).expect("Add failed");

                let count = db.replace_planning_items(
                    PlanType::MonthlyPlans,
                    json!([plan_json("a", "A"), plan_json("b", "B")]),
                ).expect("Replace failed");

                assert_eq!(count, 2);
                let ids: Vec<String> = db.get_planning_data().expect("Query failed")
                    .monthly_plans.into_iter().map(|p| p.id).collect();
                assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
            }
        }

        describe "replace_planning_data" {
            it "overwrites every collection" {
                db.add_planning_item(PlanType::DailyPlans, plan_json("p1", "One")).expect("Add failed");

                db.replace_planning_data(&PlanningData::default()).expect("Replace failed");

                assert_eq!(db.get_planning_data().expect("Query failed"), PlanningData::default());
            }
        }
    }
}
