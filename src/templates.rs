//! Embedded scaffold templates.
//!
//! Every file the composer can write is registered here as a raw template.
//! Django template syntax inside the HTML payloads is wrapped in
//! `{% raw %}` blocks so it survives rendering untouched.

use anyhow::{Context, Result};
use tera::Tera;

pub fn template_registry() -> Result<Tera> {
    let mut tera = Tera::default();
    for (name, body) in TEMPLATES {
        tera.add_raw_template(name, body)
            .with_context(|| format!("invalid template '{name}'"))?;
    }
    Ok(tera)
}

const TEMPLATES: &[(&str, &str)] = &[
    ("gitignore", GITIGNORE),
    ("README.md", README),
    ("setup.py", SETUP),
    ("setup-with-requirements.py", SETUP_WITH_REQUIREMENTS),
    ("MANIFEST.in", MANIFEST),
    ("urls.py", URLS),
    ("urls-with-view.py", URLS_WITH_VIEW),
    ("urls-with-api.py", URLS_WITH_API),
    ("urls-with-oauth.py", URLS_WITH_OAUTH),
    ("views.py", VIEWS),
    ("serializers.py", SERIALIZERS),
    ("serializers-oauth.py", SERIALIZERS_OAUTH),
    ("api_views.py", API_VIEWS),
    ("api_views-oauth.py", API_VIEWS_OAUTH),
    ("models-oauth.py", MODELS_OAUTH),
    ("index-bootstrap.html", INDEX_BOOTSTRAP),
    ("index-barebones.html", INDEX_BAREBONES),
    ("base.html", BASE_HTML),
    ("app.css", APP_CSS),
    ("app.js", APP_JS),
    ("conftest.py", CONFTEST),
    ("test_api.py", TEST_API),
    ("test_models.py", TEST_MODELS),
    ("example_command.py", EXAMPLE_COMMAND),
];

const GITIGNORE: &str = r#"__pycache__/
*.py[cod]
*.egg-info/
.eggs/
build/
dist/
db.sqlite3
.env
.venv/
.tox/
.coverage
htmlcov/
"#;

const README: &str = r#"{{ app_name }}
{{ app_header_line }}

{{ app_name_capitalized }} is a reusable Django app, packaged so it can be
installed into any project with pip.

Quick start
-----------

1. Install the package:

       pip install -e .

2. Add "{{ module_name }}" to INSTALLED_APPS in your project settings:

       INSTALLED_APPS = [
           ...
           "{{ module_name }}",
       ]

3. Include the app's URLconf in your project urls.py:

       path("{{ app_name_lowercase }}/", include("{{ module_name }}.urls")),

4. Run `python manage.py migrate`, then start the development server.
"#;

const SETUP: &str = r#"from setuptools import find_packages, setup

with open('README.md') as readme:
    long_description = readme.read()

setup(
    name='{{ package_prefix }}{{ app_name }}',
    version='0.1.0',
    description='{{ app_name_capitalized }}, packaged as a reusable Django app.',
    long_description=long_description,
    long_description_content_type='text/markdown',
    packages=find_packages(exclude=['Project']),
    include_package_data=True,
    python_requires='>=3.10',
    classifiers=[
        'Environment :: Web Environment',
        'Framework :: Django',
        'Programming Language :: Python :: 3',
    ],
)
"#;

const SETUP_WITH_REQUIREMENTS: &str = r#"from setuptools import find_packages, setup

with open('README.md') as readme:
    long_description = readme.read()

setup(
    name='{{ package_prefix }}{{ app_name }}',
    version='0.1.0',
    description='{{ app_name_capitalized }}, packaged as a reusable Django app.',
    long_description=long_description,
    long_description_content_type='text/markdown',
    packages=find_packages(exclude=['Project']),
    include_package_data=True,
    python_requires='>=3.10',
    install_requires=[
{{ install_requires }}
    ],
    classifiers=[
        'Environment :: Web Environment',
        'Framework :: Django',
        'Programming Language :: Python :: 3',
    ],
)
"#;

const MANIFEST: &str = r#"include README.md
recursive-include {{ module_name }}/templates *
recursive-include {{ module_name }}/static *
"#;

const URLS: &str = r#"from django.urls import path


urlpatterns = []
"#;

const URLS_WITH_VIEW: &str = r#"from django.urls import path

from .views import IndexView


urlpatterns = [
    path('', IndexView.as_view(), name='index'),
]
"#;

const URLS_WITH_API: &str = r#"from django.urls import path
from drf_spectacular.views import SpectacularSwaggerView

from . import api_views


urlpatterns = [
    path('api/', api_views.CustomSpectacularAPIView.as_view(), name='api-root-schema'),
    path('api/schema/', api_views.CustomSpectacularAPIView.as_view(), name='api-schema'),
    path('api/schema/swagger-ui/', SpectacularSwaggerView.as_view(url_name='api-schema'), name='swagger-ui'),
    path('api/{{ app_name_lowercase }}/', api_views.{{ module_name | capitalize }}ListCreateView.as_view(), name='{{ app_name_lowercase }}-list-create'),
]
"#;

const URLS_WITH_OAUTH: &str = r#""""
URL configuration for {{ app_name }} with OAuth2 and DRF support.
"""
from django.urls import path, include
from rest_framework.routers import DefaultRouter

from .api_views import ExampleModelViewSet, example_api_view


# Create a router and register viewsets
router = DefaultRouter()
router.register(r'examples', ExampleModelViewSet, basename='example')

urlpatterns = [
    # API endpoints via router
    path('api/', include(router.urls)),

    # Custom API endpoints
    path('api/custom-example/', example_api_view, name='custom-example'),
]
"#;

const VIEWS: &str = r#"from django.shortcuts import render
from django.views import View


class IndexView(View):
    template_name = '{{ module_name }}/index.html'

    def get(self, request):
        context = {
            'content': "{{ app_name }} Index"
        }
        return render(request, self.template_name, context)
"#;

const SERIALIZERS: &str = r#"from rest_framework import serializers


class {{ module_name | capitalize }}Serializer(serializers.Serializer):
    id = serializers.IntegerField(read_only=True)
    name = serializers.CharField(max_length=255)
    description = serializers.CharField(required=False, allow_blank=True)
"#;

const SERIALIZERS_OAUTH: &str = r#""""
Serializers for {{ app_name }} with OAuth2 support.
"""
from rest_framework import serializers
from .models import ExampleModel


class ExampleModelSerializer(serializers.ModelSerializer):
    """
    Serializer for ExampleModel.

    The 'user' field is read-only since it's automatically assigned from request.user.
    """
    class Meta:
        model = ExampleModel
        fields = ['id', 'user', 'name', 'description', 'created_at', 'updated_at']
        read_only_fields = ['user', 'created_at', 'updated_at']
"#;

const API_VIEWS: &str = r#"from rest_framework import generics
from drf_spectacular.views import SpectacularAPIView
from drf_spectacular.generators import SchemaGenerator
from drf_spectacular.utils import extend_schema
from drf_spectacular.plumbing import (
    normalize_result_object, sanitize_result_object,
)

from .serializers import {{ module_name | capitalize }}Serializer


class {{ module_name | capitalize }}ListCreateView(generics.ListCreateAPIView):
    queryset = []  # Replace with your actual queryset
    serializer_class = {{ module_name | capitalize }}Serializer


class FilteredSchemaGenerator(SchemaGenerator):
    def get_schema(self, request=None, public=False):
        """ Generate an OpenAPI schema for just the {{ app_name }} app. """
        result = super().get_schema(request, public)
        filtered_paths = {}
        for path, path_data in result['paths'].items():
            if '/{{ app_name_lowercase }}/' in path:
                filtered_paths[path] = path_data
        result['paths'] = filtered_paths
        return sanitize_result_object(normalize_result_object(result))


@extend_schema(exclude=True)
class CustomSpectacularAPIView(SpectacularAPIView):
    generator_class = FilteredSchemaGenerator
"#;

const API_VIEWS_OAUTH: &str = r#""""
API views for {{ app_name }} with OAuth2 authentication and user scoping.

All views require authentication and automatically scope data to the requesting user.
"""
from __future__ import annotations

from typing import TYPE_CHECKING

from rest_framework import viewsets
from rest_framework.decorators import api_view, permission_classes
from rest_framework.permissions import IsAuthenticated
from rest_framework.request import Request
from rest_framework.response import Response

from .models import ExampleModel
from .serializers import ExampleModelSerializer

if TYPE_CHECKING:
    from django.db.models import QuerySet


class ExampleModelViewSet(viewsets.ModelViewSet):
    """
    ViewSet for ExampleModel with automatic user scoping.

    Only returns objects owned by the authenticated user.
    Automatically assigns the current user when creating new objects.
    """
    serializer_class = ExampleModelSerializer
    permission_classes = [IsAuthenticated]

    def get_queryset(self) -> QuerySet[ExampleModel]:
        """Filter queryset to only include objects owned by the current user."""
        return ExampleModel.objects.filter(user=self.request.user)

    def perform_create(self, serializer: ExampleModelSerializer) -> None:
        """Automatically assign the current user when creating objects."""
        serializer.save(user=self.request.user)


@api_view(['GET'])
@permission_classes([IsAuthenticated])
def example_api_view(request: Request) -> Response:
    """
    Example function-based API view with authentication.

    Returns user-scoped data for the authenticated user.
    """
    examples = ExampleModel.objects.filter(user=request.user)
    serializer = ExampleModelSerializer(examples, many=True)
    return Response({
        'count': examples.count(),
        'results': serializer.data
    })
"#;

const MODELS_OAUTH: &str = r#""""
Models for {{ app_name }} with OAuth2/user scoping support.

All models include a user foreign key for multi-tenant data isolation.
"""
from __future__ import annotations

from typing import TYPE_CHECKING

from django.conf import settings
from django.db import models

if TYPE_CHECKING:
    from django.contrib.auth.models import User


class ExampleModel(models.Model):
    """
    Example model with user scoping.

    Customize this model for your app's needs.
    """
    user: models.ForeignKey = models.ForeignKey(
        settings.AUTH_USER_MODEL,
        on_delete=models.CASCADE,
        related_name='{{ module_name }}_examples',
        help_text='Owner of this record'
    )
    name: models.CharField = models.CharField(max_length=255)
    description: models.TextField = models.TextField(blank=True)
    created_at: models.DateTimeField = models.DateTimeField(auto_now_add=True)
    updated_at: models.DateTimeField = models.DateTimeField(auto_now=True)

    class Meta:
        ordering = ['-created_at']
        indexes = [
            models.Index(fields=['user', '-created_at']),
        ]

    def __str__(self) -> str:
        return f"{self.name} ({self.user.username})"
"#;

const INDEX_BOOTSTRAP: &str = r#"{% raw %}{% extends '{% endraw %}{{ module_name }}{% raw %}/base.html' %}

{% block content %}
<main class="container py-4">
  <h1 class="display-5">{{ content }}</h1>
  <p class="lead">This page is served by the {% endraw %}{{ app_name }}{% raw %} app.</p>
</main>
{% endblock %}
{% endraw %}"#;

const INDEX_BAREBONES: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ app_name_capitalized }}</title>
</head>
<body>
  <h1>{% raw %}{{ content }}{% endraw %}</h1>
</body>
</html>
"#;

const BASE_HTML: &str = r#"{% raw %}{% load static %}
{% load compress %}
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% endraw %}{{ app_name_capitalized }}{% raw %}</title>
  {% compress css %}
  <link rel="stylesheet" href="{% static '{% endraw %}{{ module_name }}{% raw %}/css/bootstrap.css' %}">
  <link rel="stylesheet" href="{% static '{% endraw %}{{ module_name }}{% raw %}/css/{% endraw %}{{ module_name }}{% raw %}.css' %}">
  {% endcompress %}
</head>
<body>
  {% block content %}{% endblock %}
  {% compress js %}
  <script src="{% static '{% endraw %}{{ module_name }}{% raw %}/js/bootstrap.bundle.js' %}"></script>
  <script src="{% static '{% endraw %}{{ module_name }}{% raw %}/js/{% endraw %}{{ module_name }}{% raw %}.js' %}"></script>
  {% endcompress %}
</body>
</html>
{% endraw %}"#;

const APP_CSS: &str = r#"/* {{ app_name }} styles. */
"#;

const APP_JS: &str = r#"/* {{ app_name }} behaviors. */
"#;

const CONFTEST: &str = r#""""
Pytest configuration and fixtures for {{ app_name }}.
"""
import pytest
from django.contrib.auth import get_user_model


User = get_user_model()


@pytest.fixture
def user(db):
    """Create a test user."""
    return User.objects.create_user(
        username='testuser',
        email='test@example.com',
        password='testpass123'
    )


@pytest.fixture
def admin_user(db):
    """Create a test admin user."""
    return User.objects.create_superuser(
        username='admin',
        email='admin@example.com',
        password='adminpass123'
    )


@pytest.fixture
def api_client():
    """Create an API client for testing."""
    from rest_framework.test import APIClient
    return APIClient()


@pytest.fixture
def authenticated_client(api_client, user):
    """Create an authenticated API client."""
    api_client.force_authenticate(user=user)
    return api_client
"#;

const TEST_API: &str = r#""""
Tests for {{ app_name }} API views.
"""
import pytest
from django.urls import reverse
from rest_framework import status

from {{ module_name }}.models import ExampleModel


@pytest.mark.django_db
class TestExampleModelViewSet:
    """Tests for ExampleModel ViewSet."""

    def test_list_requires_authentication(self, api_client):
        """Test that listing examples requires authentication."""
        url = reverse('example-list')
        response = api_client.get(url)
        assert response.status_code == status.HTTP_401_UNAUTHORIZED

    def test_list_examples(self, authenticated_client, user):
        """Test listing examples for authenticated user."""
        ExampleModel.objects.create(user=user, name='Example 1')
        ExampleModel.objects.create(user=user, name='Example 2')

        url = reverse('example-list')
        response = authenticated_client.get(url)

        assert response.status_code == status.HTTP_200_OK
        assert len(response.data) == 2

    def test_create_example(self, authenticated_client, user):
        """Test creating an example via API."""
        url = reverse('example-list')
        data = {
            'name': 'New Example',
            'description': 'Created via API'
        }
        response = authenticated_client.post(url, data)

        assert response.status_code == status.HTTP_201_CREATED
        assert response.data['name'] == 'New Example'
        assert response.data['user'] == user.id

        assert ExampleModel.objects.filter(name='New Example').exists()

    def test_user_scoping(self, api_client, user):
        """Test that users can only see their own examples."""
        from django.contrib.auth import get_user_model
        User = get_user_model()
        other_user = User.objects.create_user(
            username='otheruser',
            email='other@example.com',
            password='otherpass123'
        )

        ExampleModel.objects.create(user=user, name='User 1 Example')
        ExampleModel.objects.create(user=other_user, name='User 2 Example')

        api_client.force_authenticate(user=user)
        url = reverse('example-list')
        response = api_client.get(url)

        assert response.status_code == status.HTTP_200_OK
        assert len(response.data) == 1
        assert response.data[0]['name'] == 'User 1 Example'

    def test_update_example(self, authenticated_client, user):
        """Test updating an example."""
        example = ExampleModel.objects.create(
            user=user,
            name='Original Name'
        )

        url = reverse('example-detail', kwargs={'pk': example.pk})
        data = {'name': 'Updated Name'}
        response = authenticated_client.patch(url, data)

        assert response.status_code == status.HTTP_200_OK
        assert response.data['name'] == 'Updated Name'

        example.refresh_from_db()
        assert example.name == 'Updated Name'

    def test_delete_example(self, authenticated_client, user):
        """Test deleting an example."""
        example = ExampleModel.objects.create(
            user=user,
            name='To Delete'
        )

        url = reverse('example-detail', kwargs={'pk': example.pk})
        response = authenticated_client.delete(url)

        assert response.status_code == status.HTTP_204_NO_CONTENT
        assert not ExampleModel.objects.filter(pk=example.pk).exists()
"#;

const TEST_MODELS: &str = r#""""
Tests for {{ app_name }} models.
"""
import pytest
from django.contrib.auth import get_user_model

from {{ module_name }}.models import ExampleModel


User = get_user_model()


@pytest.mark.django_db
class TestExampleModel:
    """Tests for ExampleModel."""

    def test_create_example(self, user):
        """Test creating an ExampleModel instance."""
        example = ExampleModel.objects.create(
            user=user,
            name='Test Example',
            description='This is a test'
        )
        assert example.id is not None
        assert example.name == 'Test Example'
        assert example.user == user
        assert str(example) == f'Test Example ({user.username})'

    def test_example_ordering(self, user):
        """Test that examples are ordered by created_at (newest first)."""
        example1 = ExampleModel.objects.create(
            user=user,
            name='First'
        )
        example2 = ExampleModel.objects.create(
            user=user,
            name='Second'
        )

        examples = list(ExampleModel.objects.all())
        assert examples[0] == example2
        assert examples[1] == example1

    def test_user_deletion_cascades(self, user):
        """Test that deleting a user deletes their examples."""
        ExampleModel.objects.create(
            user=user,
            name='Test Example'
        )
        assert ExampleModel.objects.count() == 1

        user.delete()
        assert ExampleModel.objects.count() == 0
"#;

const EXAMPLE_COMMAND: &str = r#""""
Example management command for {{ app_name }}.

Usage:
    python manage.py example_command [options]
"""
from __future__ import annotations

from typing import Any

from django.core.management.base import BaseCommand, CommandParser


class Command(BaseCommand):
    """Example management command with modern patterns."""

    help = 'Example management command for {{ app_name }}'

    def add_arguments(self, parser: CommandParser) -> None:
        parser.add_argument(
            '--example-arg',
            type=str,
            help='Example string argument',
        )
        parser.add_argument(
            '--verbose',
            action='store_true',
            help='Enable verbose output',
        )

    def handle(self, *args: Any, **options: Any) -> None:
        verbose = options.get('verbose', False)
        example_arg = options.get('example_arg')

        if verbose:
            self.stdout.write(
                self.style.SUCCESS('Starting {{ app_name }} example command...')
            )

        if example_arg:
            self.stdout.write(f'Received argument: {example_arg}')

        self.process_data(verbose=verbose)

        if verbose:
            self.stdout.write(
                self.style.SUCCESS('Command completed successfully!')
            )

    def process_data(self, verbose: bool = False) -> None:
        """Stub the generated app is expected to replace."""
        if verbose:
            self.stdout.write('Processing data...')
"#;
