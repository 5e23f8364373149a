use indoc::indoc;

use crate::artifact::Artifact;
use crate::c_source::{c_identifier, c_string, render};

#[test]
fn renders_bytes_and_hooks() {
    let artifact = Artifact::new("Demo", (0u8..14).collect());

    assert_eq!(
        render(&artifact),
        indoc! {r#"
            /* typelib for namespace Demo */

            #include <girepository.h>

            static const guint8 demo_typelib_data[14] = {
              0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b,
              0x0c, 0x0d,
            };

            static GITypelib *demo_typelib;

            __attribute__((constructor)) static void
            register_demo_typelib (void)
            {
              GError *error = NULL;

              demo_typelib = g_typelib_new_from_const_memory (
                  demo_typelib_data, sizeof (demo_typelib_data), &error);
              if (demo_typelib == NULL
                  || g_irepository_load_typelib (NULL, demo_typelib, 0, &error) == NULL)
                {
                  g_warning ("failed to load typelib %s: %s", "Demo", error->message);
                  g_clear_error (&error);
                }
            }

            __attribute__((destructor)) static void
            unregister_demo_typelib (void)
            {
              g_clear_pointer (&demo_typelib, g_typelib_free);
            }
        "#}
    );
}

#[test]
fn namespace_is_escaped_for_c() {
    let text = render(&Artifact::new("Odd\"\x1b*/", vec![0; 4]));

    assert!(text.starts_with("/* typelib for namespace Odd\"\x1b* / */\n"));
    assert!(text.contains(r#"g_warning ("failed to load typelib %s: %s", "Odd\"\033*/", "#));
}

#[test]
fn string_literal_escapes() {
    assert_eq!(c_string("Gtk"), r#""Gtk""#);
    assert_eq!(c_string(r"a\b"), r#""a\\b""#);
    assert_eq!(c_string("x\n1"), r#""x\0121""#);
    assert_eq!(c_string("??="), r#""\?\?=""#);
    assert_eq!(c_string("é"), r#""\303\251""#);
}

#[test]
fn identifier_from_namespace() {
    assert_eq!(c_identifier("GLib"), "glib");
    assert_eq!(c_identifier("Gtk-4"), "gtk_4");
    assert_eq!(c_identifier("3d"), "_3d");
}
