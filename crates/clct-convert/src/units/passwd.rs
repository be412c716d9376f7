use clct_config::Config;
use clct_core::{PositionIndex, Report};
use clct_ignition as ignition;

use super::ConversionUnit;

/// `passwd.users` and `passwd.groups`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerPasswd;

impl ConversionUnit for LowerPasswd {
    fn name(&self) -> &'static str {
        "passwd"
    }

    fn lower(&self, input: &Config, _positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        let passwd = &input.passwd;
        out.passwd.users.extend(passwd.users.iter().map(|user| ignition::User {
            name: user.name.clone(),
            password_hash: user.password_hash.clone(),
            ssh_authorized_keys: user.ssh_authorized_keys.clone(),
            create: user.create.as_ref().map(|create| ignition::UserCreate {
                uid: create.uid,
                gecos: create.gecos.clone(),
                home_dir: create.home_dir.clone(),
                no_create_home: create.no_create_home,
                primary_group: create.primary_group.clone(),
                groups: create.groups.clone(),
                no_user_group: create.no_user_group,
                system: create.system,
                no_log_init: create.no_log_init,
                shell: create.shell.clone(),
            }),
        }));
        out.passwd.groups.extend(passwd.groups.iter().map(|group| ignition::Group {
            name: group.name.clone(),
            gid: group.gid,
            password_hash: group.password_hash.clone(),
            system: group.system,
        }));
        Report::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clct_config::model::{Group, User, UserCreate};

    #[test]
    fn users_and_groups_are_copied() {
        let mut input = Config::default();
        input.passwd.users = vec![
            User {
                name: "user 1".into(),
                password_hash: Some("password 1".into()),
                ssh_authorized_keys: vec!["key1".into(), "key2".into()],
                create: None,
            },
            User {
                name: "user 3".into(),
                create: Some(UserCreate::default()),
                ..User::default()
            },
        ];
        input.passwd.groups = vec![Group {
            name: "group 1".into(),
            gid: Some(1000),
            password_hash: None,
            system: true,
        }];
        let mut out = ignition::Config::default();
        assert!(LowerPasswd.lower(&input, &PositionIndex::empty(), &mut out).is_empty());

        assert_eq!(out.passwd.users[0].ssh_authorized_keys, ["key1", "key2"]);
        assert!(out.passwd.users[0].create.is_none());
        assert_eq!(out.passwd.users[1].create, Some(ignition::UserCreate::default()));
        assert_eq!(out.passwd.groups[0].gid, Some(1000));
        assert!(out.passwd.groups[0].system);
    }
}
